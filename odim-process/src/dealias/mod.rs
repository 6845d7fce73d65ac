//! Doppler velocity dealiasing.
//!
//! Folded radial velocities are corrected with a height-stratified wind
//! model: alias-invariant quantities are derived per bin, a two-parameter
//! horizontal wind is fitted per height sector, and each bin is unfolded to
//! the Nyquist interval whose corrected velocity lands closest to the
//! modelled one.

mod fit;
mod quantities;
mod sectors;
mod unfold;

use crate::output::OutputFile;
use crate::report::StageReport;
use crate::result::{Error, Result};
use crate::settings::Settings;
use crate::writer;
use log::{debug, info};
use odim_model::data::PolarVolume;
use odim_model::geometry;

/// Runs the dealiasing stage over `volume`.
///
/// Attaches the height sectors, wind models and dealiased velocities to the
/// volume and writes the corrected planes through `output`. Fatal
/// conditions (no velocity sweeps, no valid measurements, no Nyquist
/// velocity anywhere) are recorded on `report` and returned as errors.
pub fn dealias(
    volume: &mut PolarVolume,
    settings: &Settings,
    output: &mut dyn OutputFile,
    report: &mut StageReport,
) -> Result<()> {
    if volume.vrad().is_empty() {
        report.error("volume contains no velocity sweeps");
        return Err(Error::MissingVelocity);
    }
    if volume.vrad().all_missing() {
        report.error("velocity moment contains no valid measurements");
        return Err(Error::AllMissingVelocity);
    }

    let heights = geometry::beam_heights(volume.vrad(), volume.site_height_m());
    let quantities = quantities::compute(volume.vrad(), report)?;
    let sectors = sectors::partition(
        volume.vrad(),
        &heights,
        &quantities,
        volume.site_height_m(),
        settings,
    );
    debug!(
        "partitioned {} velocity bins into {} height sectors",
        sectors.member_count(),
        sectors.band_count()
    );

    let wind_models = fit::fit_wind_models(volume.vrad(), &sectors, &quantities, settings, report);
    let (dealiased, corrected) =
        unfold::unfold(volume.vrad(), &wind_models, quantities.min_nyquist, settings);
    info!("dealiasing corrected {corrected} folded bins");

    writer::write_dealiased(output, volume.vrad(), &dealiased)?;

    volume.set_sectors(sectors);
    volume.set_wind_models(wind_models)?;
    volume.set_dealiased(dealiased)?;
    Ok(())
}
