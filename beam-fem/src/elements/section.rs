//! Cross-section properties

use serde::{Deserialize, Serialize};

/// Cross-section of a prismatic beam element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSection {
    /// Catalog number (1-based)
    #[serde(default = "default_number")]
    pub number: usize,
    /// Informational name
    #[serde(default)]
    pub name: String,
    /// Area moment of inertia about the bending axis
    pub i: f64,
}

impl CrossSection {
    pub fn new(i: f64) -> Self {
        Self {
            number: 1,
            name: "Section".to_string(),
            i,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_number(mut self, number: usize) -> Self {
        self.number = number;
        self
    }

    /// Solid rectangle of width `b` and depth `h`
    pub fn rectangular(b: f64, h: f64) -> Self {
        Self::new(b * h.powi(3) / 12.0).with_name("Rectangle")
    }
}

fn default_number() -> usize {
    1
}
