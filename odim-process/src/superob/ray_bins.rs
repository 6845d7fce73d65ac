//! Adaptive ray binning for coarse cells.

use crate::settings::Settings;
use std::f64::consts::TAU;

/// Per-elevation binning plan: range-gate borders plus the per-tier shrink
/// applied to each coarse cell's ray span.
///
/// A coarse cell at range tier `j` covers source rays
/// `[k·rayFactor + shrink(j), (k+1)·rayFactor − shrink(j))`. The shrink
/// grows with range so that a cell's arc never exceeds the configured
/// bound: near the radar the full bundle fits, far out a cell may keep only
/// its central ray. Source arrays are rolled azimuthally by `half_width`
/// before aggregation so the shrunken bundles stay centered on the integer
/// borders.
pub(super) struct RayBins {
    range_borders: Vec<usize>,
    shrink: Vec<usize>,
    ray_factor: usize,
    half_width: usize,
}

impl RayBins {
    /// Computes the binning plan for a sweep with `ray_count` rays,
    /// `gate_count` gates and `rscale_m` gate length.
    pub fn compute(
        ray_count: usize,
        gate_count: usize,
        rscale_m: f64,
        settings: &Settings,
    ) -> Self {
        let ray_factor = settings.ray_angle_factor.max(1);
        let bin_factor = settings.range_bin_factor.max(1);
        let half_width = (ray_factor - 1) / 2;
        let coarse_gates = gate_count / bin_factor;

        let mut range_borders: Vec<usize> =
            (0..coarse_gates).map(|tier| tier * bin_factor).collect();
        range_borders.push(gate_count);

        // Arc bound in coarse-gate units for the base-width ray bundle.
        let arc_limit = if ray_count > 0 && rscale_m > 0.0 {
            (360.0 * 360.0 * settings.max_arc_size)
                / (TAU * ray_count as f64 * bin_factor as f64 * rscale_m)
        } else {
            0.0
        };

        // Tier ends grow as bundles narrow: width 2·(half_width − z) + 1
        // holds out to tier ⌊L/width − 1⌋ + 1, and the narrowest bundle
        // covers whatever remains.
        let mut tiers: Vec<(usize, usize)> = Vec::with_capacity(half_width + 1);
        for narrowing in 0..=half_width {
            let width = (2 * (half_width - narrowing) + 1) as f64;
            let tier_end = ((arc_limit / width - 1.0).floor() + 1.0).max(0.0) as usize;
            tiers.push((tier_end.min(range_borders.len()), narrowing));
        }
        if let Some(last) = tiers.last_mut() {
            if last.0 < range_borders.len() {
                last.0 = range_borders.len();
            }
        }

        let shrink = (0..coarse_gates)
            .map(|tier| {
                tiers
                    .iter()
                    .find(|&&(end, _)| tier < end)
                    .map_or(half_width, |&(_, narrowing)| narrowing)
            })
            .collect();

        Self {
            range_borders,
            shrink,
            ray_factor,
            half_width,
        }
    }

    /// Azimuthal roll applied to source arrays before aggregation.
    pub fn half_width(&self) -> usize {
        self.half_width
    }

    /// Range-gate borders, one more than the coarse gate count.
    pub fn range_borders(&self) -> &[usize] {
        &self.range_borders
    }

    /// First source ray of the coarse cell at (range tier, coarse ray).
    pub fn start_ray(&self, tier: usize, ray: usize) -> usize {
        ray * self.ray_factor + self.shrink[tier]
    }

    /// One past the last source ray of the coarse cell at (range tier,
    /// coarse ray).
    pub fn end_ray(&self, tier: usize, ray: usize) -> usize {
        (ray + 1) * self.ray_factor - self.shrink[tier]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_borders_append_gate_count() {
        let settings = Settings {
            range_bin_factor: 4,
            ray_angle_factor: 3,
            ..Settings::default()
        };
        let bins = RayBins::compute(16, 20, 500.0, &settings);

        assert_eq!(bins.range_borders(), &[0, 4, 8, 12, 16, 20]);
    }

    #[test]
    fn test_trailing_gates_fold_into_last_cell() {
        let settings = Settings {
            range_bin_factor: 4,
            ray_angle_factor: 3,
            ..Settings::default()
        };
        let bins = RayBins::compute(16, 22, 500.0, &settings);

        assert_eq!(bins.range_borders(), &[0, 4, 8, 12, 16, 22]);
    }

    #[test]
    fn test_shrink_grows_with_range() {
        // 360 rays of 500 m gates, pairs of gates per coarse cell, 2 km arc
        // bound: the 5-ray bundle holds to tier 22, 3 rays to 38, then the
        // central ray alone.
        let settings = Settings {
            range_bin_factor: 2,
            ray_angle_factor: 5,
            max_arc_size: 2_000.0,
            ..Settings::default()
        };
        let bins = RayBins::compute(360, 400, 500.0, &settings);

        assert_eq!(bins.half_width(), 2);
        assert_eq!(bins.start_ray(0, 0), 0);
        assert_eq!(bins.end_ray(0, 0), 5);
        assert_eq!(bins.start_ray(21, 3), 15);
        assert_eq!(bins.end_ray(21, 3), 20);
        assert_eq!(bins.start_ray(22, 3), 16);
        assert_eq!(bins.end_ray(22, 3), 19);
        assert_eq!(bins.start_ray(38, 0), 2);
        assert_eq!(bins.end_ray(38, 0), 3);
        assert_eq!(bins.start_ray(199, 0), 2);
        assert_eq!(bins.end_ray(199, 0), 3);
    }

    #[test]
    fn test_single_ray_factor_never_shrinks() {
        let settings = Settings {
            range_bin_factor: 2,
            ray_angle_factor: 1,
            max_arc_size: 100.0,
            ..Settings::default()
        };
        let bins = RayBins::compute(8, 6, 500.0, &settings);

        assert_eq!(bins.half_width(), 0);
        for tier in 0..3 {
            assert_eq!(bins.end_ray(tier, 2) - bins.start_ray(tier, 2), 1);
        }
    }
}
