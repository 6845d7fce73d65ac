use crate::data::SweepGrid;
use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One elevation sweep of a radar moment with its polar geometry.
///
/// Azimuths are radians clockwise from north, monotonically increasing
/// modulo 2π with uniform spacing. Range centers are derived from the start
/// offset and gate length: `range(r) = rstart + r · rscale`. The dataset
/// identifier is the opaque group name the writer uses to address this
/// sweep in the output file.
///
/// Reflectivity sweeps additionally carry a linear-reflectivity companion
/// and a total-quality companion, both shaped like the measurement grid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sweep {
    dataset: String,
    elevation_rad: f64,
    rstart_m: f64,
    rscale_m: f64,
    nyquist_ms: Option<f64>,
    azimuths_rad: Vec<f64>,
    ranges_m: Vec<f64>,
    values: SweepGrid<f64>,
    linear: Option<SweepGrid<f64>>,
    quality: Option<SweepGrid<f64>>,
}

impl Sweep {
    /// Creates a sweep from its geometry and measurement grid. Range centers
    /// are derived from `rstart_m` and `rscale_m`.
    ///
    /// # Panics
    ///
    /// Panics if the azimuth count does not match the grid's ray count.
    pub fn new(
        dataset: impl Into<String>,
        elevation_rad: f64,
        rstart_m: f64,
        rscale_m: f64,
        azimuths_rad: Vec<f64>,
        values: SweepGrid<f64>,
    ) -> Self {
        assert_eq!(
            azimuths_rad.len(),
            values.ray_count(),
            "azimuth count {} does not match ray count {}",
            azimuths_rad.len(),
            values.ray_count()
        );
        let ranges_m = (0..values.gate_count())
            .map(|gate| rstart_m + gate as f64 * rscale_m)
            .collect();
        Self {
            dataset: dataset.into(),
            elevation_rad,
            rstart_m,
            rscale_m,
            nyquist_ms: None,
            azimuths_rad,
            ranges_m,
            values,
            linear: None,
            quality: None,
        }
    }

    /// Sets the Nyquist velocity (m/s) of this sweep.
    pub fn with_nyquist(mut self, nyquist_ms: f64) -> Self {
        self.nyquist_ms = Some(nyquist_ms);
        self
    }

    /// Attaches the linear-reflectivity companion grid.
    ///
    /// # Panics
    ///
    /// Panics if the companion shape differs from the measurement grid.
    pub fn with_linear(mut self, linear: SweepGrid<f64>) -> Self {
        assert_eq!(linear.ray_count(), self.values.ray_count());
        assert_eq!(linear.gate_count(), self.values.gate_count());
        self.linear = Some(linear);
        self
    }

    /// Attaches the total-quality companion grid with values in [0, 1].
    ///
    /// # Panics
    ///
    /// Panics if the companion shape differs from the measurement grid.
    pub fn with_quality(mut self, quality: SweepGrid<f64>) -> Self {
        assert_eq!(quality.ray_count(), self.values.ray_count());
        assert_eq!(quality.gate_count(), self.values.gate_count());
        self.quality = Some(quality);
        self
    }

    /// The dataset group identifier used by the writer.
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Elevation angle in radians above horizontal.
    pub fn elevation_rad(&self) -> f64 {
        self.elevation_rad
    }

    /// Range to the center of the first gate in meters.
    pub fn rstart_m(&self) -> f64 {
        self.rstart_m
    }

    /// Range between consecutive gate centers in meters.
    pub fn rscale_m(&self) -> f64 {
        self.rscale_m
    }

    /// Nyquist velocity in m/s, present on velocity sweeps.
    pub fn nyquist_ms(&self) -> Option<f64> {
        self.nyquist_ms
    }

    /// Azimuth angles in radians, one per ray.
    pub fn azimuths_rad(&self) -> &[f64] {
        &self.azimuths_rad
    }

    /// Range-gate centers in meters, one per gate.
    pub fn ranges_m(&self) -> &[f64] {
        &self.ranges_m
    }

    /// Number of rays in the sweep.
    pub fn ray_count(&self) -> usize {
        self.azimuths_rad.len()
    }

    /// Number of gates per ray.
    pub fn gate_count(&self) -> usize {
        self.values.gate_count()
    }

    /// The measurement grid.
    pub fn values(&self) -> &SweepGrid<f64> {
        &self.values
    }

    /// Mutable access to the measurement grid.
    pub fn values_mut(&mut self) -> &mut SweepGrid<f64> {
        &mut self.values
    }

    /// The linear-reflectivity companion, if present.
    pub fn linear(&self) -> Option<&SweepGrid<f64>> {
        self.linear.as_ref()
    }

    /// The total-quality companion, if present.
    pub fn quality(&self) -> Option<&SweepGrid<f64>> {
        self.quality.as_ref()
    }
}

/// Uniformly spaced azimuths over `[0, 2π)` in radians.
pub fn uniform_azimuths(count: usize) -> Vec<f64> {
    (0..count)
        .map(|ray| ray as f64 * TAU / count as f64)
        .collect()
}
