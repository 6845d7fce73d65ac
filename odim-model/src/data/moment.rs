use crate::data::Sweep;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The physical quantity carried by a moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Quantity {
    /// Reflectivity factor in dBZ.
    Dbz,
    /// Horizontally-polarized reflectivity.
    Th,
    /// Radial Doppler velocity in m/s, positive receding.
    Vrad,
}

impl Quantity {
    /// The ODIM quantity name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dbz => "DBZH",
            Self::Th => "TH",
            Self::Vrad => "VRADH",
        }
    }
}

/// One radar moment across every elevation of a volume scan.
///
/// A moment may be empty (no sweeps) when the input file did not carry the
/// quantity; the stages treat emptiness as a per-stage condition rather
/// than a construction error.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Moment {
    quantity: Quantity,
    sweeps: Vec<Sweep>,
}

impl Moment {
    /// Creates a moment from its elevation sweeps, ordered bottom-up.
    pub fn new(quantity: Quantity, sweeps: Vec<Sweep>) -> Self {
        Self { quantity, sweeps }
    }

    /// Creates a moment with no sweeps.
    pub fn empty(quantity: Quantity) -> Self {
        Self {
            quantity,
            sweeps: Vec::new(),
        }
    }

    /// The physical quantity of this moment.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// The elevation sweeps comprising this moment.
    pub fn sweeps(&self) -> &[Sweep] {
        &self.sweeps
    }

    /// Mutable access to the elevation sweeps.
    pub fn sweeps_mut(&mut self) -> &mut [Sweep] {
        &mut self.sweeps
    }

    /// Number of elevations.
    pub fn sweep_count(&self) -> usize {
        self.sweeps.len()
    }

    /// True when the moment carries no sweeps at all.
    pub fn is_empty(&self) -> bool {
        self.sweeps.is_empty()
    }

    /// True when no sweep holds a valid measurement. An empty moment counts
    /// as all-missing.
    pub fn all_missing(&self) -> bool {
        self.sweeps.iter().all(|sweep| sweep.values().all_missing())
    }

    /// Smallest finite measurement across the whole moment, if any.
    pub fn finite_min(&self) -> Option<f64> {
        self.sweeps
            .iter()
            .filter_map(|sweep| sweep.values().finite_min())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.min(v))))
    }

    /// Smallest Nyquist velocity across sweeps that carry one.
    pub fn min_nyquist(&self) -> Option<f64> {
        self.sweeps
            .iter()
            .filter_map(Sweep::nyquist_ms)
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.min(v))))
    }
}
