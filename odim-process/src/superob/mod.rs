//! Spatial superobing onto a coarser polar grid.
//!
//! Reflectivity and velocity moments are aggregated into coarse cells whose
//! ray span adapts with range so that no cell subtends an arc longer than
//! the configured bound. Reflectivity uses clear-sky-aware wet/dry
//! averaging; velocity uses mean/std gating and prefers the dealiased
//! velocities when the dealiaser ran.

mod dbz;
mod grid;
mod ray_bins;
mod vrad;

use crate::output::OutputFile;
use crate::report::StageReport;
use crate::result::{Error, Result};
use crate::settings::Settings;
use crate::writer;
use log::info;
use odim_model::data::{Moment, PolarVolume, Quantity, Sweep, SweepGrid};

/// Runs the superobing stage over `volume`.
///
/// Attaches the coarse moments to the volume and writes them through
/// `output`. A volume with neither reflectivity nor velocity sweeps is a
/// fatal error; an all-missing moment is only a warning and still produces
/// all-missing coarse output.
pub fn superob(
    volume: &mut PolarVolume,
    settings: &Settings,
    output: &mut dyn OutputFile,
    report: &mut StageReport,
) -> Result<()> {
    if volume.dbz().is_empty() && volume.vrad().is_empty() {
        report.error("volume contains no reflectivity or velocity sweeps");
        return Err(Error::EmptyVolume);
    }

    if !volume.dbz().is_empty() {
        if volume.dbz().all_missing() {
            report.warn("reflectivity moment contains no valid measurements");
        }
        let coarse = superob_dbz(volume.dbz(), settings, report);
        writer::write_superobed(output, &coarse)?;
        info!("superobed reflectivity into {} sweeps", coarse.sweep_count());
        volume.set_superobed_dbz(coarse);
    }

    if !volume.vrad().is_empty() {
        if volume.vrad().all_missing() {
            report.warn("velocity moment contains no valid measurements");
        }
        let coarse = superob_vrad(volume, settings, report);
        writer::write_superobed(output, &coarse)?;
        info!("superobed velocity into {} sweeps", coarse.sweep_count());
        volume.set_superobed_vrad(coarse);
    }

    Ok(())
}

fn superob_dbz(dbz: &Moment, settings: &Settings, report: &mut StageReport) -> Moment {
    let reflectivity_floor = dbz.finite_min().unwrap_or(f64::NAN);
    let sweeps = dbz
        .sweeps()
        .iter()
        .map(|sweep| {
            let geometry = grid::coarse_geometry(sweep, settings);
            warn_if_degenerate(sweep, &geometry, report);
            let bins = ray_bins::RayBins::compute(
                sweep.ray_count(),
                sweep.gate_count(),
                sweep.rscale_m(),
                settings,
            );
            let (values, linear, quality) =
                dbz::aggregate(sweep, &bins, &geometry, reflectivity_floor, settings);
            coarse_sweep(sweep, geometry, values)
                .with_linear(linear)
                .with_quality(quality)
        })
        .collect();
    Moment::new(Quantity::Dbz, sweeps)
}

fn superob_vrad(volume: &PolarVolume, settings: &Settings, report: &mut StageReport) -> Moment {
    let sweeps = volume
        .vrad()
        .sweeps()
        .iter()
        .enumerate()
        .map(|(elevation, sweep)| {
            let geometry = grid::coarse_geometry(sweep, settings);
            warn_if_degenerate(sweep, &geometry, report);
            let bins = ray_bins::RayBins::compute(
                sweep.ray_count(),
                sweep.gate_count(),
                sweep.rscale_m(),
                settings,
            );
            let source = volume.velocity_source(elevation);
            let (values, quality) = vrad::aggregate(source, &bins, &geometry, settings);
            coarse_sweep(sweep, geometry, values).with_quality(quality)
        })
        .collect();
    Moment::new(Quantity::Vrad, sweeps)
}

fn coarse_sweep(source: &Sweep, geometry: grid::CoarseGeometry, values: SweepGrid<f64>) -> Sweep {
    let mut sweep = Sweep::new(
        source.dataset().to_owned(),
        source.elevation_rad(),
        geometry.rstart_m,
        geometry.rscale_m,
        geometry.azimuths_rad,
        values,
    );
    if let Some(nyquist) = source.nyquist_ms() {
        sweep = sweep.with_nyquist(nyquist);
    }
    sweep
}

fn warn_if_degenerate(sweep: &Sweep, geometry: &grid::CoarseGeometry, report: &mut StageReport) {
    if geometry.ray_count == 0 || geometry.gate_count == 0 {
        report.warn(format!(
            "sweep {}: {}x{} source grid degenerates to an empty coarse grid",
            sweep.dataset(),
            sweep.ray_count(),
            sweep.gate_count()
        ));
    }
}
