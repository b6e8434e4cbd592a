use thiserror::Error;

/// Errors returned at the fallible edges of the crate
///
/// Clustering itself never fails; these cover parameter validation and the
/// CSV input/output of the command line tool.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Viewport corners that do not describe an area on the map.
    #[error("invalid viewport: {0}")]
    InvalidViewport(String),

    /// Malformed CSV input or a failed CSV write.
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    /// Input or output file error.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
