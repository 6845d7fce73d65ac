//! Equivalent-Earth beam geometry.
//!
//! Propagation through the mean troposphere is absorbed into an inflated
//! Earth radius, so beam heights follow from plane trigonometry on the
//! effective sphere.

use crate::data::Moment;

/// Mean Earth radius used by the equivalent-Earth model (m).
pub const EARTH_RADIUS_M: f64 = 6_371_200.0;

/// Effective-radius inflation factor absorbing mean refraction.
pub const EFFECTIVE_RADIUS_FACTOR: f64 = 4.0 / 3.0;

/// Height above sea level of a radar bin under the equivalent-Earth model.
///
/// For non-negative elevation angles the result is never below the site
/// height.
pub fn beam_height_m(elevation_rad: f64, slant_range_m: f64, site_height_m: f64) -> f64 {
    let effective_radius = EFFECTIVE_RADIUS_FACTOR * EARTH_RADIUS_M;
    (slant_range_m * slant_range_m
        + effective_radius * effective_radius
        + 2.0 * slant_range_m * effective_radius * elevation_rad.sin())
    .sqrt()
        - (effective_radius - site_height_m)
}

/// Per-elevation, per-gate bin heights for a whole moment.
///
/// Beam height does not depend on azimuth, so one row per elevation covers
/// every ray of the sweep.
pub fn beam_heights(moment: &Moment, site_height_m: f64) -> Vec<Vec<f64>> {
    moment
        .sweeps()
        .iter()
        .map(|sweep| {
            sweep
                .ranges_m()
                .iter()
                .map(|&range| beam_height_m(sweep.elevation_rad(), range, site_height_m))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{uniform_azimuths, Quantity, Sweep, SweepGrid};

    #[test]
    fn test_height_at_zero_range_is_site_height() {
        assert!((beam_height_m(0.1, 0.0, 312.0) - 312.0).abs() < 1e-9);
    }

    #[test]
    fn test_height_never_below_site_for_nonnegative_elevation() {
        for &elevation in &[0.0, 0.01, 0.3, 1.2] {
            for &range in &[0.0, 1_000.0, 50_000.0, 200_000.0] {
                assert!(beam_height_m(elevation, range, 100.0) >= 100.0);
            }
        }
    }

    #[test]
    fn test_height_grows_with_elevation() {
        let low = beam_height_m(0.02, 80_000.0, 0.0);
        let high = beam_height_m(0.2, 80_000.0, 0.0);

        assert!(high > low);
        // At 0.2 rad the beam is close to range * sin(elevation).
        assert!((high - 80_000.0 * 0.2f64.sin()).abs() / high < 0.05);
    }

    #[test]
    fn test_beam_heights_shape_follows_moment() {
        let moment = Moment::new(
            Quantity::Vrad,
            vec![
                Sweep::new(
                    "dataset1",
                    0.01,
                    0.0,
                    500.0,
                    uniform_azimuths(4),
                    SweepGrid::filled(4, 3, 0.0),
                ),
                Sweep::new(
                    "dataset2",
                    0.05,
                    0.0,
                    1_000.0,
                    uniform_azimuths(2),
                    SweepGrid::filled(2, 2, 0.0),
                ),
            ],
        );

        let heights = beam_heights(&moment, 50.0);
        assert_eq!(heights.len(), 2);
        assert_eq!(heights[0].len(), 3);
        assert_eq!(heights[1].len(), 2);
        // Steeper sweep with longer gates sits higher at the same gate index.
        assert!(heights[1][1] > heights[0][1]);
    }
}
