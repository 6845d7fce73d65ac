#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::correctness)]

//! # odim
//!
//! Preprocessing pipeline for ODIM polar-volume weather radar data: Doppler
//! velocity dealiasing against a height-stratified wind model, and spatial
//! superobing onto an arc-bounded coarse polar grid.
//!
//! The crate consumes a homogenized [`model::data::PolarVolume`] and an
//! output seam implementing [`process::output::OutputFile`]; reading and
//! writing ODIM-H5 files, homogenization and settings parsing live outside
//! this workspace.
//!

pub use odim_model as model;
pub use odim_process as process;

mod pipeline;
pub use pipeline::process_volume;

pub mod prelude;
pub mod result;
pub use result::{Error, Result};
