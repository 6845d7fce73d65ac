//! Velocity aggregation with dispersion gating.

use super::grid::CoarseGeometry;
use super::ray_bins::RayBins;
use crate::settings::Settings;
use odim_model::data::SweepGrid;

/// Velocity values at or above this are legacy fill, not signal.
const VELOCITY_FILL: f64 = 1e6;

/// Aggregates one velocity sweep onto the coarse grid.
///
/// A cell emits the mean of its defined source bins when enough of them are
/// defined and their standard deviation stays under the gate; otherwise the
/// cell stays missing with zero quality.
pub(super) fn aggregate(
    source: &SweepGrid<f64>,
    bins: &RayBins,
    geometry: &CoarseGeometry,
    settings: &Settings,
) -> (SweepGrid<f64>, SweepGrid<f64>) {
    let values = source.roll_rays(bins.half_width());

    let mut coarse_values = SweepGrid::filled(geometry.ray_count, geometry.gate_count, f64::NAN);
    let mut coarse_quality = SweepGrid::filled(geometry.ray_count, geometry.gate_count, 0.0);

    let borders = bins.range_borders();
    for tier in 0..geometry.gate_count {
        for ray in 0..geometry.ray_count {
            let (start_gate, end_gate) = (borders[tier], borders[tier + 1]);
            let (start_ray, end_ray) = (bins.start_ray(tier, ray), bins.end_ray(tier, ray));
            let cell_size = (end_ray - start_ray) * (end_gate - start_gate);

            let mut defined = 0usize;
            let mut sum = 0.0;
            let mut square_sum = 0.0;
            for source_ray in start_ray..end_ray {
                for source_gate in start_gate..end_gate {
                    let velocity = values.value(source_ray, source_gate);
                    if velocity.is_nan() || velocity >= VELOCITY_FILL {
                        continue;
                    }
                    defined += 1;
                    sum += velocity;
                    square_sum += velocity * velocity;
                }
            }
            if defined == 0 {
                continue;
            }

            let mean = sum / defined as f64;
            let deviation = ((square_sum - sum * mean) / defined as f64).max(0.0).sqrt();
            if defined as f64 > settings.vrad_percentage * cell_size as f64
                && deviation < settings.vrad_max_std
            {
                coarse_values.set(ray, tier, mean);
                coarse_quality.set(ray, tier, 1.0);
            }
        }
    }

    (coarse_values, coarse_quality)
}
