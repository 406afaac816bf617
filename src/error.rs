//! Error types for vyuha-nav.
//!
//! Only recoverable conditions get an error type: configuration loading
//! and I/O. Motion friction is reported as boolean primitive results, and
//! internal invariant violations are fatal assertions by design.

use thiserror::Error;

/// Vyuha-nav error type
#[derive(Error, Debug)]
pub enum VyuhaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for VyuhaError {
    fn from(e: toml::de::Error) -> Self {
        VyuhaError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VyuhaError>;
