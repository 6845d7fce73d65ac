//! Composition of the persisted output layout.
//!
//! Each sweep writes under its opaque dataset group: coarse dimensions under
//! `<dataset>/where`, data planes under `<dataset>/dataN` with their coding
//! attributes in `dataN/what`, and quality planes under `<dataset>/quality1`
//! with the producing task named in `quality1/how`.

use crate::output::{AttributeValue, OutputFile};
use crate::quantize::{quantize, quantize_quality, QUALITY_GAIN};
use odim_model::data::{Moment, Sweep, SweepGrid};
use std::io;

/// Fallback nodata byte when the homogenizer left none on the dataset.
pub(crate) const DEFAULT_NODATA: u8 = 255;

/// Nodata byte for quality planes. Full quality encodes to 255 under the
/// fixed 1/255 gain, so missing cells take byte 0 instead.
pub(crate) const QUALITY_NODATA: u8 = 0;

/// Writes the coarse dimensions of a superobed sweep.
pub(crate) fn write_where(
    output: &mut dyn OutputFile,
    path: &str,
    sweep: &Sweep,
) -> io::Result<()> {
    let where_path = format!("{path}/where");
    output.write_attribute(
        &where_path,
        "nbins",
        AttributeValue::Int(sweep.gate_count() as i64),
    )?;
    output.write_attribute(
        &where_path,
        "nrays",
        AttributeValue::Int(sweep.ray_count() as i64),
    )?;
    output.write_attribute(
        &where_path,
        "rscale",
        AttributeValue::Double(sweep.rscale_m()),
    )
}

/// Quantizes and writes one data plane with its coding attributes. The
/// nodata byte is looked up from the group's existing attributes.
pub(crate) fn write_data_group(
    output: &mut dyn OutputFile,
    path: &str,
    group: &str,
    field: &SweepGrid<f64>,
) -> io::Result<()> {
    let group_path = format!("{path}/{group}");
    let what_path = format!("{group_path}/what");
    let nodata = output
        .read_attribute(&what_path, "nodata")
        .map(|value| value as u8)
        .unwrap_or(DEFAULT_NODATA);

    let (bytes, coding) = quantize(field, nodata);
    output.write_attribute(&what_path, "gain", AttributeValue::Double(coding.gain))?;
    output.write_attribute(&what_path, "offset", AttributeValue::Double(coding.offset))?;
    output.write_attribute(&what_path, "nodata", AttributeValue::Double(nodata as f64))?;
    output.write_attribute(&what_path, "undetect", AttributeValue::Double(0.0))?;
    output.write_dataset(&group_path, "data", &bytes)
}

/// Quantizes and writes one quality plane with the fixed coding and the
/// producing task's name.
pub(crate) fn write_quality_group(
    output: &mut dyn OutputFile,
    path: &str,
    group: &str,
    field: &SweepGrid<f64>,
    task: &str,
) -> io::Result<()> {
    let group_path = format!("{path}/{group}");
    let what_path = format!("{group_path}/what");
    let how_path = format!("{group_path}/how");

    let bytes = quantize_quality(field, QUALITY_NODATA);
    output.write_attribute(&what_path, "gain", AttributeValue::Double(QUALITY_GAIN))?;
    output.write_attribute(&what_path, "offset", AttributeValue::Double(0.0))?;
    output.write_attribute(&how_path, "task", AttributeValue::Text(task.to_owned()))?;
    output.write_dataset(&group_path, "data", &bytes)
}

/// Writes the dealiased velocity plane and its success mask for every sweep,
/// next to the original velocities under the same dataset groups.
pub(crate) fn write_dealiased(
    output: &mut dyn OutputFile,
    vrad: &Moment,
    dealiased: &[SweepGrid<f64>],
) -> io::Result<()> {
    for (sweep, field) in vrad.sweeps().iter().zip(dealiased) {
        let path = sweep.dataset();
        write_data_group(output, path, "data2", field)?;

        let mask_values = field
            .values()
            .iter()
            .map(|v| if v.is_finite() { 1.0 } else { 0.0 })
            .collect();
        let mask = SweepGrid::new(field.ray_count(), field.gate_count(), mask_values);
        write_quality_group(output, path, "quality1", &mask, "dealiasing")?;
    }
    Ok(())
}

/// Writes a superobed moment: dimensions, data planes, quality plane.
pub(crate) fn write_superobed(output: &mut dyn OutputFile, moment: &Moment) -> io::Result<()> {
    for sweep in moment.sweeps() {
        let path = sweep.dataset();
        write_where(output, path, sweep)?;
        write_data_group(output, path, "data1", sweep.values())?;
        if let Some(linear) = sweep.linear() {
            write_data_group(output, path, "data2", linear)?;
        }
        if let Some(quality) = sweep.quality() {
            write_quality_group(output, path, "quality1", quality, "superobing")?;
        }
    }
    Ok(())
}
