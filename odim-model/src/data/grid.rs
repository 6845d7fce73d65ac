#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangular (ray × gate) field of values for a single sweep.
///
/// # Data Layout
///
/// Data is stored in row-major order where rays are rows and gates are
/// columns: `values[ray * gate_count + gate]`. This layout is cache-friendly
/// for iterating along rays, which matches how polar data is aggregated.
///
/// # Invalid Values
///
/// For floating-point grids, invalid or missing data is represented as
/// `f64::NAN`. Each sweep owns an exactly-sized buffer, so there is no
/// rectangular padding to skip.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SweepGrid<T> {
    ray_count: usize,
    gate_count: usize,
    values: Vec<T>,
}

impl<T> SweepGrid<T> {
    /// Creates a new grid with the given dimensions and data.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != ray_count * gate_count`.
    pub fn new(ray_count: usize, gate_count: usize, values: Vec<T>) -> Self {
        assert_eq!(
            values.len(),
            ray_count * gate_count,
            "values length {} does not match ray_count {} * gate_count {} = {}",
            values.len(),
            ray_count,
            gate_count,
            ray_count * gate_count
        );
        Self {
            ray_count,
            gate_count,
            values,
        }
    }

    /// Number of rays (rows) in the grid.
    pub fn ray_count(&self) -> usize {
        self.ray_count
    }

    /// Number of gates (columns) in the grid.
    pub fn gate_count(&self) -> usize {
        self.gate_count
    }

    /// Returns a reference to the data values.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns a mutable reference to the data values.
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Consumes the grid and returns the values vector.
    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    /// Returns the linear index for (ray, gate) coordinates.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if ray >= ray_count or gate >= gate_count.
    #[inline]
    pub fn idx(&self, ray: usize, gate: usize) -> usize {
        debug_assert!(
            ray < self.ray_count,
            "ray={} >= ray_count={}",
            ray,
            self.ray_count
        );
        debug_assert!(
            gate < self.gate_count,
            "gate={} >= gate_count={}",
            gate,
            self.gate_count
        );
        ray * self.gate_count + gate
    }

    /// Returns a reference to the value at (ray, gate).
    #[inline]
    pub fn get(&self, ray: usize, gate: usize) -> &T {
        &self.values[self.idx(ray, gate)]
    }

    /// Returns a mutable reference to the value at (ray, gate).
    #[inline]
    pub fn get_mut(&mut self, ray: usize, gate: usize) -> &mut T {
        let idx = self.idx(ray, gate);
        &mut self.values[idx]
    }

    /// Stores `value` at (ray, gate).
    #[inline]
    pub fn set(&mut self, ray: usize, gate: usize, value: T) {
        let idx = self.idx(ray, gate);
        self.values[idx] = value;
    }
}

impl<T: Clone> SweepGrid<T> {
    /// Creates a grid with every cell set to `value`.
    pub fn filled(ray_count: usize, gate_count: usize, value: T) -> Self {
        Self::new(ray_count, gate_count, vec![value; ray_count * gate_count])
    }

    /// Returns a copy rotated along the ray axis: ray `a` of the source
    /// lands at ray `(a + shift) % ray_count` of the result.
    pub fn roll_rays(&self, shift: usize) -> Self {
        if self.ray_count == 0 {
            return self.clone();
        }
        let shift = shift % self.ray_count;
        if shift == 0 {
            return self.clone();
        }

        let mut rolled = self.values.clone();
        for ray in 0..self.ray_count {
            let dest = (ray + shift) % self.ray_count;
            rolled[dest * self.gate_count..(dest + 1) * self.gate_count]
                .clone_from_slice(&self.values[ray * self.gate_count..(ray + 1) * self.gate_count]);
        }
        Self {
            ray_count: self.ray_count,
            gate_count: self.gate_count,
            values: rolled,
        }
    }
}

impl SweepGrid<f64> {
    /// Returns the value at (ray, gate) by copy.
    #[inline]
    pub fn value(&self, ray: usize, gate: usize) -> f64 {
        self.values[self.idx(ray, gate)]
    }

    /// Smallest finite value, if any.
    pub fn finite_min(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.min(v))))
    }

    /// Largest finite value, if any.
    pub fn finite_max(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }

    /// Number of finite cells.
    pub fn finite_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_finite()).count()
    }

    /// True when no cell holds a number.
    pub fn all_missing(&self) -> bool {
        self.values.iter().all(|v| v.is_nan())
    }
}
