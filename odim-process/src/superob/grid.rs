//! Coarse-grid geometry.

use crate::settings::Settings;
use odim_model::data::{uniform_azimuths, Sweep};

/// Geometry of one coarse sweep.
pub(super) struct CoarseGeometry {
    pub ray_count: usize,
    pub gate_count: usize,
    pub rstart_m: f64,
    pub rscale_m: f64,
    pub azimuths_rad: Vec<f64>,
}

/// Derives the coarse geometry of a sweep: ray and gate counts divide by the
/// configured factors, the gate length scales up by the range factor, the
/// start offset and elevation are unchanged, and azimuths are regenerated
/// uniformly over the full circle.
pub(super) fn coarse_geometry(sweep: &Sweep, settings: &Settings) -> CoarseGeometry {
    let ray_factor = settings.ray_angle_factor.max(1);
    let bin_factor = settings.range_bin_factor.max(1);
    let ray_count = sweep.ray_count() / ray_factor;
    let gate_count = sweep.gate_count() / bin_factor;
    CoarseGeometry {
        ray_count,
        gate_count,
        rstart_m: sweep.rstart_m(),
        rscale_m: bin_factor as f64 * sweep.rscale_m(),
        azimuths_rad: uniform_azimuths(ray_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odim_model::data::{uniform_azimuths, SweepGrid};

    #[test]
    fn test_coarse_dimensions_divide_by_factors() {
        let sweep = Sweep::new(
            "dataset1",
            0.02,
            1_000.0,
            500.0,
            uniform_azimuths(16),
            SweepGrid::filled(16, 20, 0.0),
        );
        let settings = Settings {
            range_bin_factor: 4,
            ray_angle_factor: 3,
            ..Settings::default()
        };

        let geometry = coarse_geometry(&sweep, &settings);

        assert_eq!(geometry.ray_count, 5);
        assert_eq!(geometry.gate_count, 5);
        assert_eq!(geometry.rstart_m, 1_000.0);
        assert_eq!(geometry.rscale_m, 2_000.0);
        assert_eq!(geometry.azimuths_rad.len(), 5);
    }

    #[test]
    fn test_oversized_factors_degenerate_to_empty() {
        let sweep = Sweep::new(
            "dataset1",
            0.02,
            0.0,
            500.0,
            uniform_azimuths(2),
            SweepGrid::filled(2, 3, 0.0),
        );
        let settings = Settings {
            range_bin_factor: 4,
            ray_angle_factor: 3,
            ..Settings::default()
        };

        let geometry = coarse_geometry(&sweep, &settings);

        assert_eq!(geometry.ray_count, 0);
        assert_eq!(geometry.gate_count, 0);
    }
}
