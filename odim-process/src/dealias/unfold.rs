//! Nyquist-multiplier search.

use crate::settings::Settings;
use odim_model::data::{Moment, SweepGrid};

/// Unfolds every bin that has both a measurement and a wind model.
///
/// The corrected velocity is `measured + 2·k·vny` for the integer `k` in
/// `[−N, N]` (with `N = ⌊max_wind / min_nyquist⌋`) that lands closest to
/// the modelled velocity. The search walks multipliers by growing magnitude
/// and keeps the first strict improvement, so distance ties resolve to the
/// smaller |k|. Bins without a model or measurement stay NaN.
///
/// Returns the dealiased grids and the number of bins that needed a nonzero
/// multiplier.
pub(super) fn unfold(
    vrad: &Moment,
    wind_models: &[SweepGrid<f64>],
    min_nyquist: f64,
    settings: &Settings,
) -> (Vec<SweepGrid<f64>>, usize) {
    let search_span = (settings.max_wind / min_nyquist).floor() as i64;
    let mut corrected = 0usize;
    let mut dealiased = Vec::with_capacity(vrad.sweep_count());

    for (sweep, models) in vrad.sweeps().iter().zip(wind_models) {
        let mut grid = SweepGrid::filled(sweep.ray_count(), sweep.gate_count(), f64::NAN);
        if let Some(nyquist) = sweep.nyquist_ms() {
            for ray in 0..sweep.ray_count() {
                for gate in 0..sweep.gate_count() {
                    let measured = sweep.values().value(ray, gate);
                    let modelled = models.value(ray, gate);
                    if measured.is_nan() || modelled.is_nan() {
                        continue;
                    }

                    let mut best_multiplier = 0i64;
                    let mut best_distance = (measured - modelled).abs();
                    for magnitude in 1..=search_span {
                        for multiplier in [magnitude, -magnitude] {
                            let distance =
                                (measured + 2.0 * multiplier as f64 * nyquist - modelled).abs();
                            if distance < best_distance {
                                best_distance = distance;
                                best_multiplier = multiplier;
                            }
                        }
                    }

                    if best_multiplier != 0 {
                        corrected += 1;
                    }
                    grid.set(
                        ray,
                        gate,
                        measured + 2.0 * best_multiplier as f64 * nyquist,
                    );
                }
            }
        }
        dealiased.push(grid);
    }

    (dealiased, corrected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use odim_model::data::{uniform_azimuths, Quantity, Sweep};

    fn unfold_single(
        measured: f64,
        modelled: f64,
        nyquist: f64,
        max_wind: f64,
    ) -> (f64, usize) {
        let sweep = Sweep::new(
            "dataset1",
            0.0,
            0.0,
            500.0,
            uniform_azimuths(1),
            SweepGrid::new(1, 1, vec![measured]),
        )
        .with_nyquist(nyquist);
        let moment = Moment::new(Quantity::Vrad, vec![sweep]);
        let models = vec![SweepGrid::new(1, 1, vec![modelled])];
        let settings = Settings {
            max_wind,
            ..Settings::default()
        };
        let (grids, corrected) = unfold(&moment, &models, nyquist, &settings);
        (grids[0].value(0, 0), corrected)
    }

    #[test]
    fn test_unaliased_bin_keeps_its_value() {
        let (value, corrected) = unfold_single(3.0, 2.0, 10.0, 40.0);

        assert_eq!(value, 3.0);
        assert_eq!(corrected, 0);
    }

    #[test]
    fn test_folded_bin_is_restored() {
        // True velocity 15 folded into [-10, 10] as -5.
        let (value, corrected) = unfold_single(-5.0, 14.0, 10.0, 40.0);

        assert_eq!(value, 15.0);
        assert_eq!(corrected, 1);
    }

    #[test]
    fn test_distance_tie_resolves_to_smaller_multiplier() {
        // Model sits exactly between k = 0 and k = 1 candidates.
        let (value, corrected) = unfold_single(-5.0, 5.0, 10.0, 40.0);

        assert_eq!(value, -5.0);
        assert_eq!(corrected, 0);
    }

    #[test]
    fn test_chosen_multiplier_is_optimal() {
        let nyquist: f64 = 8.0;
        let max_wind: f64 = 45.0;
        let span = (max_wind / nyquist).floor() as i64;
        for &(measured, modelled) in &[(-7.5, 30.0), (3.25, -38.0), (0.0, 12.0), (6.0, -6.1)] {
            let (value, _) = unfold_single(measured, modelled, nyquist, max_wind);

            let chosen = (value - modelled).abs();
            for multiplier in -span..=span {
                let candidate =
                    (measured + 2.0 * multiplier as f64 * nyquist - modelled).abs();
                assert!(
                    chosen <= candidate + 1e-12,
                    "measured {measured}, model {modelled}: |{value} - model| > candidate k={multiplier}"
                );
            }

            // The correction is an exact multiple of the Nyquist interval.
            let folds = (value - measured) / (2.0 * nyquist);
            assert!((folds - folds.round()).abs() < 1e-12);
            assert!(folds.round().abs() as i64 <= span);
        }
    }

    #[test]
    fn test_missing_model_leaves_nan() {
        let sweep = Sweep::new(
            "dataset1",
            0.0,
            0.0,
            500.0,
            uniform_azimuths(2),
            SweepGrid::new(2, 1, vec![1.0, f64::NAN]),
        )
        .with_nyquist(10.0);
        let moment = Moment::new(Quantity::Vrad, vec![sweep]);
        let models = vec![SweepGrid::new(2, 1, vec![f64::NAN, 2.0])];
        let settings = Settings::default();

        let (grids, corrected) = unfold(&moment, &models, 10.0, &settings);

        assert!(grids[0].value(0, 0).is_nan());
        assert!(grids[0].value(1, 0).is_nan());
        assert_eq!(corrected, 0);
    }
}
