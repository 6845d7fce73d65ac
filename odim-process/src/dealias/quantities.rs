//! Alias-invariant model quantities for the wind fit.

use crate::report::StageReport;
use crate::result::{Error, Result};
use odim_model::data::{Moment, SweepGrid};
use std::f64::consts::{PI, TAU};

/// Per-bin fit quantities and the trigonometric caches they derive from.
///
/// For a measurement `v` with Nyquist velocity `V`, the folded phase
/// `π·v/V` is invariant under aliasing, so `f₁ = sin(π·v/V)` and
/// `f₃ = (V/π)·cos(π·v/V)` see through the folds. `a` and `b` project `f₁`
/// onto the radial-velocity sinusoid; `d` is the azimuthal derivative of
/// `f₃`, estimated by a wrap-aware centered difference. All three are NaN
/// wherever the measurement is missing or the sweep carries no Nyquist
/// velocity.
pub(super) struct ModelQuantities {
    pub a: Vec<SweepGrid<f64>>,
    pub b: Vec<SweepGrid<f64>>,
    pub d: Vec<SweepGrid<f64>>,
    pub cos_elevation: Vec<f64>,
    pub cos_azimuth: Vec<Vec<f64>>,
    pub sin_azimuth: Vec<Vec<f64>>,
    /// Smallest Nyquist velocity across the volume (m/s).
    pub min_nyquist: f64,
}

/// Computes the fit quantities for every velocity sweep.
///
/// Sweeps without a Nyquist velocity stay all-NaN and raise a warning; a
/// volume without any Nyquist velocity is a fatal error.
pub(super) fn compute(vrad: &Moment, report: &mut StageReport) -> Result<ModelQuantities> {
    let sweep_count = vrad.sweep_count();
    let mut a = Vec::with_capacity(sweep_count);
    let mut b = Vec::with_capacity(sweep_count);
    let mut d = Vec::with_capacity(sweep_count);
    let mut cos_elevation = Vec::with_capacity(sweep_count);
    let mut cos_azimuth = Vec::with_capacity(sweep_count);
    let mut sin_azimuth = Vec::with_capacity(sweep_count);
    let mut min_nyquist = f64::INFINITY;

    for sweep in vrad.sweeps() {
        let ray_count = sweep.ray_count();
        let gate_count = sweep.gate_count();
        let cos_el = sweep.elevation_rad().cos();
        let cos_az: Vec<f64> = sweep.azimuths_rad().iter().map(|az| az.cos()).collect();
        let sin_az: Vec<f64> = sweep.azimuths_rad().iter().map(|az| az.sin()).collect();

        let mut a_grid = SweepGrid::filled(ray_count, gate_count, f64::NAN);
        let mut b_grid = SweepGrid::filled(ray_count, gate_count, f64::NAN);
        let mut d_grid = SweepGrid::filled(ray_count, gate_count, f64::NAN);

        if let Some(nyquist) = sweep.nyquist_ms() {
            min_nyquist = min_nyquist.min(nyquist);

            let mut f3 = SweepGrid::filled(ray_count, gate_count, f64::NAN);
            for ray in 0..ray_count {
                for gate in 0..gate_count {
                    let measured = sweep.values().value(ray, gate);
                    if measured.is_nan() {
                        continue;
                    }
                    let phase = PI * measured / nyquist;
                    let f1 = phase.sin();
                    a_grid.set(ray, gate, cos_el * cos_az[ray] * f1);
                    b_grid.set(ray, gate, cos_el * sin_az[ray] * f1);
                    f3.set(ray, gate, nyquist / PI * phase.cos());
                }
            }

            for ray in 0..ray_count {
                let next = (ray + 1) % ray_count;
                let prev = (ray + ray_count - 1) % ray_count;
                let mut delta = sweep.azimuths_rad()[next] - sweep.azimuths_rad()[prev];
                // The difference spans the 0/2π seam on the first and last
                // rays; restore the true angular separation there.
                if ray == 0 || ray + 1 == ray_count {
                    delta += TAU;
                }
                for gate in 0..gate_count {
                    if sweep.values().value(ray, gate).is_nan() {
                        continue;
                    }
                    d_grid.set(
                        ray,
                        gate,
                        (f3.value(next, gate) - f3.value(prev, gate)) / delta,
                    );
                }
            }
        } else {
            report.warn(format!(
                "sweep {} has no Nyquist velocity and is excluded from the wind fit",
                sweep.dataset()
            ));
        }

        a.push(a_grid);
        b.push(b_grid);
        d.push(d_grid);
        cos_elevation.push(cos_el);
        cos_azimuth.push(cos_az);
        sin_azimuth.push(sin_az);
    }

    if !min_nyquist.is_finite() {
        report.error("no velocity sweep carries a Nyquist velocity");
        return Err(Error::MissingNyquist);
    }

    Ok(ModelQuantities {
        a,
        b,
        d,
        cos_elevation,
        cos_azimuth,
        sin_azimuth,
        min_nyquist,
    })
}
