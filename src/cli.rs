use std::path::PathBuf;

use clap::Parser;

use crate::catalog::source::{DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SOURCE_URL};
use crate::matcher::DEFAULT_LIMIT;

/// Find the closest named colours to a hex or RGB colour.
#[derive(Parser, Debug)]
#[command(name = "colour-search", version, about)]
pub struct Args {
    /// Colour to search for (`#rgb`, `#rrggbb` or `r, g, b`). Prints the
    /// matches and exits; without it the interactive UI starts.
    pub query: Option<String>,

    /// Palette document: an http(s) URL or a local JSON file
    #[arg(short, long, env = "COLOUR_SEARCH_SOURCE", default_value = DEFAULT_SOURCE_URL)]
    pub source: String,

    /// Maximum number of matches to show
    #[arg(short = 'n', long, default_value_t = DEFAULT_LIMIT as u64, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: u64,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Write logs to this file (the interactive UI otherwise logs nothing)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
