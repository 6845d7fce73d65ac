//!
//! This module contains models representing a homogenized polar radar volume
//! and the products attached to it by the processing stages. The models do
//! not match the on-disk ODIM-H5 group structure; they are the in-memory
//! working representation shared by the dealiasing and superobing stages.
//!

mod grid;
pub use grid::*;

mod sweep;
pub use sweep::*;

mod moment;
pub use moment::*;

mod sectors;
pub use sectors::*;

mod volume;
pub use volume::*;
