// =============================================================================
// error.rs - EVERYTHING THAT CAN GO WRONG, IN ONE PLACE
// =============================================================================
//
// The pipeline has exactly one soft failure: a pattern that does not match.
// That one never shows up here; it becomes "N/A" or 0.0 in the record.
// Everything else (network, disk, a mangled line in the intermediate file,
// bad configuration) stops the run, and this enum says why.
// =============================================================================

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The GET for a product page failed at the transport level.
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize product record")]
    Serialize(#[source] serde_json::Error),

    /// A line in the line-record file did not deserialize into a full record.
    /// `line` is 1-based.
    #[error("malformed record on line {line}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write CSV row")]
    Csv(#[from] csv::Error),

    #[error("invalid product URL {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid value {value:?} for {key}")]
    InvalidSetting { key: String, value: String },
}

impl ScrapeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScrapeError::Io {
            path: path.into(),
            source,
        }
    }
}
