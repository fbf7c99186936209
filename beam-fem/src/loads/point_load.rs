//! Concentrated loads on the beam

use serde::{Deserialize, Serialize};

/// A concentrated force and/or moment at a position along the beam
///
/// Downward forces are negative, clockwise moments are negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcentratedLoad {
    /// Distance from the left end of the beam
    pub position: f64,
    /// Vertical force
    pub force: f64,
    /// Moment
    #[serde(default)]
    pub moment: f64,
}

impl ConcentratedLoad {
    /// Create a new concentrated load
    pub fn new(position: f64, force: f64, moment: f64) -> Self {
        Self {
            position,
            force,
            moment,
        }
    }

    /// A pure force
    pub fn force(position: f64, force: f64) -> Self {
        Self::new(position, force, 0.0)
    }

    /// A pure moment
    pub fn moment(position: f64, moment: f64) -> Self {
        Self::new(position, 0.0, moment)
    }

    /// Create a downward point force
    pub fn downward(position: f64, magnitude: f64) -> Self {
        Self::force(position, -magnitude.abs())
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.position, self.force * factor, self.moment * factor)
    }

    /// Same load moved to a new position
    pub fn at(&self, position: f64) -> Self {
        Self::new(position, self.force, self.moment)
    }

    pub fn is_zero(&self) -> bool {
        self.force == 0.0 && self.moment == 0.0
    }
}
