//! Read-only processing configuration.

use serde::Deserialize;

/// Settings consumed by the processing stages.
///
/// Constructed once at startup, typically deserialized from the external
/// namelist parser, and passed by shared reference into the stages. Nothing
/// mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run the dealiasing stage.
    pub dealiasing: bool,
    /// Run the superobing stage.
    pub superobing: bool,
    /// Height-sector width for the wind fit (m).
    pub z_sector_size: f64,
    /// Height ceiling for the wind fit (m above sea level).
    pub z_max: f64,
    /// Minimum eligible bins for a sector to be fitted.
    pub min_good_points: usize,
    /// Upper bound on plausible wind speed (m/s); rejects fitted model
    /// velocities and bounds the Nyquist-multiplier search.
    pub max_wind: f64,
    /// Source range gates folded into one coarse gate.
    pub range_bin_factor: usize,
    /// Source rays folded into one coarse ray.
    pub ray_angle_factor: usize,
    /// Longest arc a coarse cell may subtend (m).
    pub max_arc_size: f64,
    /// Quality gate for reflectivity aggregation.
    pub min_quality: f64,
    /// Reflectivity above this counts as precipitation, at or below as
    /// clear sky (dBZ).
    pub dbz_clearsky: f64,
    /// Fraction of a coarse cell that must be wet to emit a wet average.
    pub dbz_percentage: f64,
    /// Fraction of a coarse cell that must be defined to emit a velocity.
    pub vrad_percentage: f64,
    /// Velocity standard deviation gate within a coarse cell (m/s).
    pub vrad_max_std: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dealiasing: true,
            superobing: true,
            z_sector_size: 200.0,
            z_max: 12_000.0,
            min_good_points: 100,
            max_wind: 50.0,
            range_bin_factor: 5,
            ray_angle_factor: 5,
            max_arc_size: 2_000.0,
            min_quality: 0.8,
            dbz_clearsky: -5.0,
            dbz_percentage: 0.3,
            vrad_percentage: 0.3,
            vrad_max_std: 5.0,
        }
    }
}
