//! Where raw palette documents come from.
//!
//! A document is JSON shaped as `{ "colors": [ { "color": .., "hex": .. } ] }`.
//! Decoding lives in `parse_document` so it can be tested without I/O.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{FetchError, Result};

/// The xkcd color survey list, ~950 named colors.
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/NishantChandla/color-test-resources/main/xkcd-colors.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// WIRE TYPES
// =============================================================================

/// One record as it appears in the source document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawColor {
    pub color: String,
    pub hex: String,
}

#[derive(Deserialize)]
struct Document {
    colors: Vec<RawColor>,
}

/// Decode a palette document.
pub fn parse_document(text: &str) -> Result<Vec<RawColor>> {
    let doc: Document = serde_json::from_str(text)?;
    Ok(doc.colors)
}

// =============================================================================
// SOURCES
// =============================================================================

/// Something that can produce the raw palette. Each call is a fresh attempt.
pub trait PaletteSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<RawColor>>;

    /// Human readable location, used in logs and the UI.
    fn describe(&self) -> String;
}

/// Fetches the document with a single HTTP GET.
pub struct HttpSource {
    http: reqwest::blocking::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, request_timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(concat!("colour-search/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

impl PaletteSource for HttpSource {
    fn fetch(&self) -> Result<Vec<RawColor>> {
        log::debug!("GET {}", self.url);
        let response = self.http.get(&self.url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let text = response.text()?;
        parse_document(&text)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads the document from a local file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PaletteSource for FileSource {
    fn fetch(&self) -> Result<Vec<RawColor>> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| FetchError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        parse_document(&text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Pick a source from a CLI argument: URLs go over HTTP, anything else is a
/// file path.
pub fn source_from_arg(arg: &str, request_timeout: Duration) -> Result<Box<dyn PaletteSource>> {
    if arg.starts_with("http://") || arg.starts_with("https://") {
        Ok(Box::new(HttpSource::new(arg, request_timeout)?))
    } else {
        Ok(Box::new(FileSource::new(arg)))
    }
}
