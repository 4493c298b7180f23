//! Layout error types.
//!
//! Geometry never fails (malformed values are sanitized in place); these
//! errors cover layout selection, attachment and configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("unknown layout type: {0}")]
    UnknownLayoutType(String),

    #[error("layout is already attached to a container")]
    AlreadyAttached,

    #[error("invalid layout config: {0}")]
    InvalidConfig(String),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}
