//! Beam element between two consecutive nodes

use serde::{Deserialize, Serialize};

/// Element connecting node `left` to node `right`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// 1-based element number
    pub number: usize,
    /// Left node number
    pub left: usize,
    /// Right node number
    pub right: usize,
    /// Material catalog number
    pub material: usize,
    /// Cross-section catalog number
    pub section: usize,
    /// Derived length |x_right - x_left|
    pub length: f64,
}

impl Element {
    pub fn new(number: usize, left: usize, right: usize, length: f64) -> Self {
        Self {
            number,
            left,
            right,
            material: 1,
            section: 1,
            length,
        }
    }
}
