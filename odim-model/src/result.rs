//!
//! Contains the Result and Error types for model operations.
//!

use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(ThisError, Debug)]
pub enum Error {
    /// A processing product does not mirror the sweep count of the moment it
    /// accompanies.
    #[error("companion grid count mismatch: expected {expected}, got {actual}")]
    CompanionCountMismatch {
        /// Sweep count of the moment.
        expected: usize,
        /// Number of companion grids supplied.
        actual: usize,
    },

    /// A processing product does not mirror the shape of its sweep.
    #[error("companion grid shape mismatch at elevation {elevation}: expected {expected_rays}x{expected_gates}, got {rays}x{gates}")]
    CompanionShapeMismatch {
        /// Elevation index of the mismatching sweep.
        elevation: usize,
        /// Ray count of the sweep.
        expected_rays: usize,
        /// Gate count of the sweep.
        expected_gates: usize,
        /// Ray count of the companion grid.
        rays: usize,
        /// Gate count of the companion grid.
        gates: usize,
    },
}
