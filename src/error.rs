/// Failure while loading the palette. No partial palette is ever published
/// when one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("palette source returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed palette document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("palette entry '{name}' has invalid hex '{hex}'")]
    InvalidEntry { name: String, hex: String },
}

pub type Result<T> = std::result::Result<T, FetchError>;
