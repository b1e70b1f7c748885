//! Generator errors.

use std::io;

use thiserror::Error;

/// Error of a generator run.
#[allow(variant_size_differences)]
#[derive(Debug, Error)]
pub enum GenError {
    /// The network rejected an input.
    #[error("network error: {0}")]
    Network(#[from] sag4fun::Error),

    /// Writing the output failed.
    #[error("file system error: {0}")]
    Fs(#[from] io::Error),

    /// A self-check produced a wrong result.
    #[error("regression failed: {0}")]
    Regression(String),
}
