pub mod app;
pub mod catalog;
pub mod cli;
pub mod color;
pub mod error;
pub mod matcher;
pub mod query;
pub mod report;
pub mod tui;
