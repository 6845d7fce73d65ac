//!
//! Unified error types for the facade crate.
//!
//! All sub-crate error types convert to the unified [`Error`] via [`From`],
//! so `?` propagates seamlessly across the model and processing layers.
//!

use thiserror::Error as ThisError;

/// A unified result type using the facade-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type consolidating model and processing errors.
#[derive(ThisError, Debug)]
pub enum Error {
    /// Error from the data-model layer, typically a processing product that
    /// does not mirror the volume geometry.
    #[error("model error: {0}")]
    Model(#[from] odim_model::result::Error),

    /// Error from a processing stage: empty or all-missing input, or a
    /// missing Nyquist velocity.
    #[error("processing error: {0}")]
    Process(#[from] odim_process::result::Error),

    /// I/O error from the output seam.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
