//!
//! Contains the Result and Error types for the processing stages.
//!

use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Dealiasing needs at least one velocity sweep.
    #[error("volume contains no velocity sweeps")]
    MissingVelocity,

    /// Dealiasing needs at least one valid velocity measurement.
    #[error("velocity moment contains no valid measurements")]
    AllMissingVelocity,

    /// Dealiasing needs a Nyquist velocity on at least one sweep.
    #[error("no velocity sweep carries a Nyquist velocity")]
    MissingNyquist,

    /// Superobing needs at least one reflectivity or velocity sweep.
    #[error("volume contains no reflectivity or velocity sweeps")]
    EmptyVolume,

    /// A processing product did not match the volume geometry.
    #[error("model error: {0}")]
    Model(#[from] odim_model::result::Error),

    /// The output seam failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}
