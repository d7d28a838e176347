//! CLI error type.

use std::path::PathBuf;

use fintera_lib::error::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("no backend URL: pass --url, set FINTERA_URL or add base_url to the settings file")]
    MissingUrl,

    #[error("no access token: pass --token, set FINTERA_TOKEN or add token to the settings file")]
    MissingToken,

    /// The list was fetched and rendered, but the fetch failed.
    #[error("{0}")]
    ListFailed(String),

    #[error("invalid filter `{0}`, expected KEY=VALUE with a key other than sort, page or per_page")]
    InvalidFilter(String),

    #[error("failed to read settings from {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed settings file {path}: {source}")]
    SettingsJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
