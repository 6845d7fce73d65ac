//! Height-sector partition of eligible velocity bins.

use super::quantities::ModelQuantities;
use crate::settings::Settings;
use odim_model::data::{BinIndex, HeightSectors, Moment};

/// Partitions eligible velocity bins into vertical slabs of
/// `z_sector_size` meters starting at the site height.
///
/// A bin is eligible when its beam height, measurement and azimuthal
/// derivative are all defined and the height lies between the site and the
/// ceiling, which is the lower of the highest data bin and `z_max`. The
/// ceiling is inclusive so the highest data bin lands in the last sector.
pub(super) fn partition(
    vrad: &Moment,
    heights: &[Vec<f64>],
    quantities: &ModelQuantities,
    site_height_m: f64,
    settings: &Settings,
) -> HeightSectors {
    let floor = site_height_m;
    let width = settings.z_sector_size;

    let mut data_max = f64::NEG_INFINITY;
    for row in heights {
        for &z in row {
            if z.is_finite() && z > data_max {
                data_max = z;
            }
        }
    }
    if !data_max.is_finite() || width <= 0.0 {
        return HeightSectors::default();
    }
    let ceiling = data_max.min(settings.z_max);
    if ceiling < floor {
        return HeightSectors::default();
    }

    let band_count = ((ceiling - floor) / width).floor() as usize + 1;
    let floors = (0..band_count)
        .map(|band| floor + band as f64 * width)
        .collect();
    let ceilings = (0..band_count)
        .map(|band| floor + (band + 1) as f64 * width)
        .collect();
    let mut sectors = HeightSectors::with_bands(floors, ceilings);

    for (elevation, sweep) in vrad.sweeps().iter().enumerate() {
        for gate in 0..sweep.gate_count() {
            let z = heights[elevation][gate];
            if !z.is_finite() || z < floor || z > ceiling {
                continue;
            }
            let band = (((z - floor) / width).floor() as usize).min(band_count - 1);
            for ray in 0..sweep.ray_count() {
                if sweep.values().value(ray, gate).is_nan() {
                    continue;
                }
                if quantities.d[elevation].value(ray, gate).is_nan() {
                    continue;
                }
                sectors.insert(
                    band,
                    BinIndex {
                        elevation,
                        ray,
                        gate,
                    },
                );
            }
        }
    }

    sectors
}
