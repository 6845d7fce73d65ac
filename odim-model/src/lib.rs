//!
//! # odim-model
//! Core data model for polar-volume weather radar data in the ODIM-H5 layout.
//! Provides sweep-shaped array containers with NaN semantics for missing data,
//! the per-file polar volume with its processing products, and equivalent-Earth
//! beam geometry.
//!
//! An optional feature is available:
//! - `serde`: Implement `serde::Serialize` and `serde::Deserialize` for all models.
//!

#![forbid(unsafe_code)]
#![warn(clippy::correctness)]
#![allow(clippy::too_many_arguments)]

pub mod data;
pub mod geometry;
pub mod result;
