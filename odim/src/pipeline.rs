//! Per-file processing driver.

use crate::result::Result;
use log::{debug, info};
use odim_model::data::PolarVolume;
use odim_process::dealias::dealias;
use odim_process::output::OutputFile;
use odim_process::report::StageReport;
use odim_process::settings::Settings;
use odim_process::superob::superob;

/// Runs the enabled stages over one volume, sequentially and to completion.
///
/// Each stage's report is drained to the logger after the stage returns,
/// whether it succeeded or not. The first fatal stage error aborts the file
/// and is returned; later files are unaffected because every file owns its
/// volume and output handle.
pub fn process_volume(
    volume: &mut PolarVolume,
    settings: &Settings,
    output: &mut dyn OutputFile,
) -> Result<()> {
    if settings.dealiasing {
        debug!("dealiasing volume");
        let mut report = StageReport::new("dealias");
        let outcome = dealias(volume, settings, output, &mut report);
        report.drain_to_log();
        outcome?;
    }

    if settings.superobing {
        debug!("superobing volume");
        let mut report = StageReport::new("superob");
        let outcome = superob(volume, settings, output, &mut report);
        report.drain_to_log();
        outcome?;
    }

    info!("volume processed");
    Ok(())
}
