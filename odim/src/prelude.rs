//! Convenient re-exports for common usage patterns.
//!
//! ```ignore
//! use odim::prelude::*;
//!
//! let mut volume = /* homogenized PolarVolume */;
//! let settings = Settings::default();
//! let mut output = MemoryOutput::new();
//! process_volume(&mut volume, &settings, &mut output)?;
//! ```

pub use crate::{process_volume, Error, Result};

pub use odim_model::data::{
    uniform_azimuths, BinIndex, HeightSectors, Moment, PolarVolume, Quantity, Sweep, SweepGrid,
};
pub use odim_model::geometry::beam_height_m;

pub use odim_process::output::{AttributeValue, MemoryOutput, OutputFile};
pub use odim_process::report::StageReport;
pub use odim_process::settings::Settings;
