#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position of one bin inside a volume: elevation, ray, gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinIndex {
    /// Elevation (sweep) index.
    pub elevation: usize,
    /// Ray (azimuth) index within the sweep.
    pub ray: usize,
    /// Gate (range) index within the ray.
    pub gate: usize,
}

/// Vertical partition of eligible velocity bins into height bands.
///
/// Each band spans `[floor_m(n), ceiling_m(n))` meters above sea level and
/// lists the bins whose beam height falls inside it. The ordering of bins
/// within a band is not significant.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeightSectors {
    floors_m: Vec<f64>,
    ceilings_m: Vec<f64>,
    members: Vec<Vec<BinIndex>>,
}

impl HeightSectors {
    /// Creates an empty partition with the given band boundaries.
    ///
    /// # Panics
    ///
    /// Panics if the floor and ceiling counts differ.
    pub fn with_bands(floors_m: Vec<f64>, ceilings_m: Vec<f64>) -> Self {
        assert_eq!(
            floors_m.len(),
            ceilings_m.len(),
            "floor count {} does not match ceiling count {}",
            floors_m.len(),
            ceilings_m.len()
        );
        let members = vec![Vec::new(); floors_m.len()];
        Self {
            floors_m,
            ceilings_m,
            members,
        }
    }

    /// Number of height bands.
    pub fn band_count(&self) -> usize {
        self.floors_m.len()
    }

    /// Lower boundary of band `band` in meters.
    pub fn floor_m(&self, band: usize) -> f64 {
        self.floors_m[band]
    }

    /// Upper boundary of band `band` in meters.
    pub fn ceiling_m(&self, band: usize) -> f64 {
        self.ceilings_m[band]
    }

    /// Bins assigned to band `band`.
    pub fn members(&self, band: usize) -> &[BinIndex] {
        &self.members[band]
    }

    /// Assigns a bin to band `band`.
    pub fn insert(&mut self, band: usize, bin: BinIndex) {
        self.members[band].push(bin);
    }

    /// Total number of assigned bins across all bands.
    pub fn member_count(&self) -> usize {
        self.members.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_and_members() {
        let mut sectors = HeightSectors::with_bands(vec![0.0, 200.0], vec![200.0, 400.0]);
        sectors.insert(
            0,
            BinIndex {
                elevation: 0,
                ray: 3,
                gate: 1,
            },
        );
        sectors.insert(
            1,
            BinIndex {
                elevation: 1,
                ray: 0,
                gate: 0,
            },
        );
        sectors.insert(
            1,
            BinIndex {
                elevation: 1,
                ray: 1,
                gate: 0,
            },
        );

        assert_eq!(sectors.band_count(), 2);
        assert_eq!(sectors.floor_m(1), 200.0);
        assert_eq!(sectors.ceiling_m(1), 400.0);
        assert_eq!(sectors.members(0).len(), 1);
        assert_eq!(sectors.members(1).len(), 2);
        assert_eq!(sectors.member_count(), 3);
    }

    #[test]
    #[should_panic]
    fn test_band_boundary_count_mismatch() {
        let _ = HeightSectors::with_bands(vec![0.0], vec![200.0, 400.0]);
    }
}
