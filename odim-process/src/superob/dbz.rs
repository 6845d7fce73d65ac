//! Clear-sky-aware reflectivity aggregation.

use super::grid::CoarseGeometry;
use super::ray_bins::RayBins;
use crate::settings::Settings;
use odim_model::data::{Sweep, SweepGrid};

/// Linear-reflectivity values at or above this are legacy fill, not signal.
const LINEAR_FILL: f64 = 1e5;

/// Aggregates one reflectivity sweep onto the coarse grid.
///
/// Source bins passing the quality gate split into wet and dry by the
/// clear-sky threshold. A cell with enough wet bins averages them and their
/// linear-reflectivity companions; a cell with only dry bins emits the
/// volume-wide reflectivity floor; a cell with neither stays missing.
/// Returns the coarse (values, linear, quality) grids.
pub(super) fn aggregate(
    sweep: &Sweep,
    bins: &RayBins,
    geometry: &CoarseGeometry,
    reflectivity_floor: f64,
    settings: &Settings,
) -> (SweepGrid<f64>, SweepGrid<f64>, SweepGrid<f64>) {
    let values = sweep.values().roll_rays(bins.half_width());
    let linear = sweep.linear().map(|grid| grid.roll_rays(bins.half_width()));
    let quality = sweep.quality().map(|grid| grid.roll_rays(bins.half_width()));

    let mut coarse_values = SweepGrid::filled(geometry.ray_count, geometry.gate_count, f64::NAN);
    let mut coarse_linear = SweepGrid::filled(geometry.ray_count, geometry.gate_count, f64::NAN);
    let mut coarse_quality = SweepGrid::filled(geometry.ray_count, geometry.gate_count, f64::NAN);

    let borders = bins.range_borders();
    for tier in 0..geometry.gate_count {
        for ray in 0..geometry.ray_count {
            let (start_gate, end_gate) = (borders[tier], borders[tier + 1]);
            let (start_ray, end_ray) = (bins.start_ray(tier, ray), bins.end_ray(tier, ray));
            let cell_size = (end_ray - start_ray) * (end_gate - start_gate);

            let mut wet = 0usize;
            let mut dry = 0usize;
            let mut wet_sum = 0.0;
            let mut linear_count = 0usize;
            let mut linear_sum = 0.0;

            for source_ray in start_ray..end_ray {
                for source_gate in start_gate..end_gate {
                    let q = quality
                        .as_ref()
                        .map_or(f64::NAN, |grid| grid.value(source_ray, source_gate));
                    if q.is_nan() || q <= settings.min_quality {
                        continue;
                    }
                    let measured = values.value(source_ray, source_gate);
                    if measured > settings.dbz_clearsky {
                        wet += 1;
                        wet_sum += measured;
                        if let Some(linear) = &linear {
                            let th = linear.value(source_ray, source_gate);
                            if th < LINEAR_FILL {
                                linear_count += 1;
                                linear_sum += th;
                            }
                        }
                    } else {
                        dry += 1;
                    }
                }
            }

            if wet as f64 > settings.dbz_percentage * cell_size as f64 {
                coarse_values.set(ray, tier, wet_sum / wet as f64);
                coarse_quality.set(ray, tier, 1.0);
                if linear_count > 0 {
                    coarse_linear.set(ray, tier, linear_sum / linear_count as f64);
                }
            } else if dry > 0 {
                coarse_values.set(ray, tier, reflectivity_floor);
                coarse_quality.set(ray, tier, 1.0);
            }
        }
    }

    (coarse_values, coarse_linear, coarse_quality)
}
