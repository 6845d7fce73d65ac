use crate::data::{HeightSectors, Moment, SweepGrid};
use crate::result::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The per-file polar volume: site metadata, the homogenized moments, and
/// the products attached by the processing stages.
///
/// A volume is created by the ingest stage, mutated by the dealiaser (height
/// sectors, wind models, dealiased velocities) and the superober (coarse
/// moments), and dropped once its results are written. Either moment may be
/// empty when the input file did not carry it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolarVolume {
    site_height_m: f64,
    dbz: Moment,
    vrad: Moment,
    sectors: Option<HeightSectors>,
    wind_models: Option<Vec<SweepGrid<f64>>>,
    dealiased: Option<Vec<SweepGrid<f64>>>,
    superobed_dbz: Option<Moment>,
    superobed_vrad: Option<Moment>,
}

impl PolarVolume {
    /// Creates a volume from the homogenized moments.
    pub fn new(site_height_m: f64, dbz: Moment, vrad: Moment) -> Self {
        Self {
            site_height_m,
            dbz,
            vrad,
            sectors: None,
            wind_models: None,
            dealiased: None,
            superobed_dbz: None,
            superobed_vrad: None,
        }
    }

    /// Height of the radar feedhorn above sea level in meters.
    pub fn site_height_m(&self) -> f64 {
        self.site_height_m
    }

    /// The reflectivity moment.
    pub fn dbz(&self) -> &Moment {
        &self.dbz
    }

    /// The radial-velocity moment.
    pub fn vrad(&self) -> &Moment {
        &self.vrad
    }

    /// The height-sector partition attached by the dealiaser.
    pub fn sectors(&self) -> Option<&HeightSectors> {
        self.sectors.as_ref()
    }

    /// Attaches the height-sector partition.
    pub fn set_sectors(&mut self, sectors: HeightSectors) {
        self.sectors = Some(sectors);
    }

    /// Per-bin modelled radial velocities from the fitted wind, if present.
    pub fn wind_models(&self) -> Option<&[SweepGrid<f64>]> {
        self.wind_models.as_deref()
    }

    /// Attaches the wind-model grids, one per velocity sweep.
    pub fn set_wind_models(&mut self, grids: Vec<SweepGrid<f64>>) -> Result<()> {
        check_companion_shapes(&self.vrad, &grids)?;
        self.wind_models = Some(grids);
        Ok(())
    }

    /// Dealiased radial velocities, if the dealiaser ran.
    pub fn dealiased(&self) -> Option<&[SweepGrid<f64>]> {
        self.dealiased.as_deref()
    }

    /// Attaches the dealiased velocity grids, one per velocity sweep.
    pub fn set_dealiased(&mut self, grids: Vec<SweepGrid<f64>>) -> Result<()> {
        check_companion_shapes(&self.vrad, &grids)?;
        self.dealiased = Some(grids);
        Ok(())
    }

    /// Velocity grid to aggregate for sweep `elevation`: the dealiased grid
    /// when dealiasing ran, the raw measurements otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `elevation` is out of range for the velocity moment.
    pub fn velocity_source(&self, elevation: usize) -> &SweepGrid<f64> {
        match &self.dealiased {
            Some(grids) => &grids[elevation],
            None => self.vrad.sweeps()[elevation].values(),
        }
    }

    /// The superobed reflectivity moment, if the superober ran.
    pub fn superobed_dbz(&self) -> Option<&Moment> {
        self.superobed_dbz.as_ref()
    }

    /// Attaches the superobed reflectivity moment.
    pub fn set_superobed_dbz(&mut self, moment: Moment) {
        self.superobed_dbz = Some(moment);
    }

    /// The superobed velocity moment, if the superober ran.
    pub fn superobed_vrad(&self) -> Option<&Moment> {
        self.superobed_vrad.as_ref()
    }

    /// Attaches the superobed velocity moment.
    pub fn set_superobed_vrad(&mut self, moment: Moment) {
        self.superobed_vrad = Some(moment);
    }
}

/// Checks that `grids` mirror the sweep shapes of `moment`.
fn check_companion_shapes(moment: &Moment, grids: &[SweepGrid<f64>]) -> Result<()> {
    if grids.len() != moment.sweep_count() {
        return Err(Error::CompanionCountMismatch {
            expected: moment.sweep_count(),
            actual: grids.len(),
        });
    }
    for (elevation, (sweep, grid)) in moment.sweeps().iter().zip(grids).enumerate() {
        if grid.ray_count() != sweep.ray_count() || grid.gate_count() != sweep.gate_count() {
            return Err(Error::CompanionShapeMismatch {
                elevation,
                expected_rays: sweep.ray_count(),
                expected_gates: sweep.gate_count(),
                rays: grid.ray_count(),
                gates: grid.gate_count(),
            });
        }
    }
    Ok(())
}
