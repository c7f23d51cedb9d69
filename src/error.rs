//! Error types surfaced to the session host.
//!
//! The simulation itself recovers locally from every anomaly it can meet
//! (missing bodies, degenerate vectors, out-of-range settings). The only
//! fallible surface is decoding host-supplied configuration.

use std::fmt;

/// Failure to decode a settings document
#[derive(Debug)]
pub enum ConfigError {
    /// The document was not valid JSON or had wrongly typed fields
    Parse(serde_json::Error),
    /// A field decoded to NaN or infinity
    NonFinite {
        /// Field name as it appears in the document
        field: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid settings document: {e}"),
            Self::NonFinite { field } => write!(f, "settings field `{field}` is not finite"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::NonFinite { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}
