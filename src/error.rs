//! Error taxonomy for descriptor generation.
//!
//! Every failure surfaces synchronously to the caller; nothing is retried
//! internally. A write failure leaves no guarantee about either output file.

use thiserror::Error;

/// Errors raised while resolving boosters or building the server descriptor
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The requested capability id is not in the registry (programmer error)
    #[error("unknown booster capability: {0}")]
    UnknownBooster(String),

    /// A datasource was requested for a driver the builder has no
    /// properties-element mapping for
    #[error("unsupported JDBC driver: {0}")]
    UnsupportedDriver(String),

    /// The external encoder reported output on stderr
    #[error("password encoding failed: {0}")]
    Encryption(String),

    /// Filesystem or subprocess I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
