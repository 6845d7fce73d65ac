//! Per-sector two-parameter wind fit.

use super::quantities::ModelQuantities;
use crate::report::StageReport;
use crate::settings::Settings;
use log::debug;
use nalgebra::{Matrix2, Vector2};
use odim_model::data::{HeightSectors, Moment, SweepGrid};

/// Fits a horizontal wind `(u, v)` per height sector by least squares and
/// evaluates the modelled radial velocity at every member bin.
///
/// Sectors with fewer than `min_good_points` members, or whose normal
/// equations are singular, yield no model and their bins stay NaN. Modelled
/// velocities at or above `max_wind` are rejected bin by bin and counted
/// into one aggregate warning.
pub(super) fn fit_wind_models(
    vrad: &Moment,
    sectors: &HeightSectors,
    quantities: &ModelQuantities,
    settings: &Settings,
    report: &mut StageReport,
) -> Vec<SweepGrid<f64>> {
    let mut models: Vec<SweepGrid<f64>> = vrad
        .sweeps()
        .iter()
        .map(|sweep| SweepGrid::filled(sweep.ray_count(), sweep.gate_count(), f64::NAN))
        .collect();
    let mut over_speed = 0usize;

    for band in 0..sectors.band_count() {
        let members = sectors.members(band);
        if members.len() < settings.min_good_points {
            debug!(
                "sector {band}: {} bins, below the fit minimum of {}",
                members.len(),
                settings.min_good_points
            );
            continue;
        }

        let (mut saa, mut sbb, mut sab, mut sad, mut sbd) = (0.0, 0.0, 0.0, 0.0, 0.0);
        for bin in members {
            let a = quantities.a[bin.elevation].value(bin.ray, bin.gate);
            let b = quantities.b[bin.elevation].value(bin.ray, bin.gate);
            let d = quantities.d[bin.elevation].value(bin.ray, bin.gate);
            saa += a * a;
            sbb += b * b;
            sab += a * b;
            sad += a * d;
            sbd += b * d;
        }

        // Normal equations of min Σ(−A·u + B·v − D)².
        let system = Matrix2::new(saa, -sab, -sab, sbb);
        let rhs = Vector2::new(-sad, sbd);
        let Some(wind) = system.lu().solve(&rhs) else {
            debug!("sector {band}: singular wind fit over {} bins", members.len());
            continue;
        };
        let (u, v) = (wind[0], wind[1]);
        if !u.is_finite() || !v.is_finite() {
            debug!("sector {band}: degenerate wind fit over {} bins", members.len());
            continue;
        }
        debug!(
            "sector {band}: wind ({u:.1}, {v:.1}) m/s from {} bins",
            members.len()
        );

        for bin in members {
            let modelled = quantities.cos_elevation[bin.elevation]
                * (u * quantities.sin_azimuth[bin.elevation][bin.ray]
                    + v * quantities.cos_azimuth[bin.elevation][bin.ray]);
            if modelled.abs() < settings.max_wind {
                models[bin.elevation].set(bin.ray, bin.gate, modelled);
            } else {
                over_speed += 1;
            }
        }
    }

    if over_speed > 0 {
        report.warn(format!(
            "{over_speed} bins rejected with modelled wind at or above {} m/s",
            settings.max_wind
        ));
    }
    models
}
