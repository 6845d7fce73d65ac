//!
//! # odim-process
//! Processing stages for homogenized ODIM polar volumes: Doppler velocity
//! dealiasing against a height-stratified wind model, and spatial superobing
//! onto an arc-bounded coarse polar grid. Results leave through an abstract
//! output seam as quantized 8-bit planes.
//!

#![forbid(unsafe_code)]
#![warn(clippy::correctness)]

pub mod dealias;
pub mod output;
pub mod quantize;
pub mod report;
pub mod result;
pub mod settings;
pub mod superob;

mod writer;
