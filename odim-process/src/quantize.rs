//! 8-bit quantization of output fields.

use odim_model::data::SweepGrid;

/// Linear coding of an 8-bit plane: `value = gain · byte + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantization {
    /// Value increment per byte step.
    pub gain: f64,
    /// Value of byte zero.
    pub offset: f64,
}

/// Gain used for quality planes, which span [0, 1] exactly.
pub const QUALITY_GAIN: f64 = 1.0 / 255.0;

/// Encodes a field to bytes, choosing gain and offset from its finite range.
///
/// Missing cells encode as `nodata`. Finite cells land in the 0..254 band,
/// keeping the nodata byte unambiguous even when it is 255; decoding stays
/// within about one gain step of the original. A constant field keeps unit
/// gain so the coding stays invertible.
pub fn quantize(field: &SweepGrid<f64>, nodata: u8) -> (SweepGrid<u8>, Quantization) {
    let (min, max) = match (field.finite_min(), field.finite_max()) {
        (Some(min), Some(max)) => (min, max),
        _ => {
            let bytes = SweepGrid::filled(field.ray_count(), field.gate_count(), nodata);
            return (
                bytes,
                Quantization {
                    gain: 1.0,
                    offset: 0.0,
                },
            );
        }
    };

    let mut gain = (max - min) / 254.0;
    if gain.abs() < 1e-12 {
        gain = 1.0;
    }
    let offset = (254.0 * min - max) / 253.0;

    let bytes = field
        .values()
        .iter()
        .map(|&value| {
            if value.is_finite() {
                ((value - offset + 0.5 * gain) / gain)
                    .floor()
                    .clamp(0.0, 254.0) as u8
            } else {
                nodata
            }
        })
        .collect();

    (
        SweepGrid::new(field.ray_count(), field.gate_count(), bytes),
        Quantization { gain, offset },
    )
}

/// Encodes a quality plane with the fixed [0, 1] coding; missing cells
/// encode as `nodata`.
pub fn quantize_quality(field: &SweepGrid<f64>, nodata: u8) -> SweepGrid<u8> {
    let bytes = field
        .values()
        .iter()
        .map(|&quality| {
            if quality.is_finite() {
                (quality / QUALITY_GAIN + 0.5).floor().clamp(0.0, 255.0) as u8
            } else {
                nodata
            }
        })
        .collect();
    SweepGrid::new(field.ray_count(), field.gate_count(), bytes)
}
