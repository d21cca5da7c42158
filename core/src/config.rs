use serde::Serialize;

use crate::error::{GraphError, Result};
use crate::graph::Weight;

/// Accepted interaction weights, inclusive on both ends.
///
/// The lower bound is always at least 1: weights are summed as path cost,
/// and the shortest-path search relies on every edge costing something.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeightRange {
    min: Weight,
    max: Weight,
}

impl WeightRange {
    pub const DEFAULT_MIN: Weight = 1;
    pub const DEFAULT_MAX: Weight = 5;

    /// Returns None if `min` is zero or `min > max`.
    pub fn new(min: Weight, max: Weight) -> Option<Self> {
        if min == 0 || min > max {
            return None;
        }
        Some(Self { min, max })
    }

    pub fn min(&self) -> Weight {
        self.min
    }

    pub fn max(&self) -> Weight {
        self.max
    }

    pub fn contains(&self, weight: Weight) -> bool {
        (self.min..=self.max).contains(&weight)
    }

    /// Validate a raw (possibly negative) weight, as typed at a prompt.
    pub fn check(&self, weight: i64) -> Result<Weight> {
        match Weight::try_from(weight) {
            Ok(w) if self.contains(w) => Ok(w),
            _ => Err(GraphError::InvalidWeight {
                weight,
                min: self.min,
                max: self.max,
            }),
        }
    }
}

impl Default for WeightRange {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}
