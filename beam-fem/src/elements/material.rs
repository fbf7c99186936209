//! Material properties

use serde::{Deserialize, Serialize};

/// Elastic material used by beam elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Catalog number (1-based)
    #[serde(default = "default_number")]
    pub number: usize,
    /// Informational name
    #[serde(default)]
    pub name: String,
    /// Modulus of elasticity (Young's modulus)
    pub e: f64,
    /// Poisson's ratio, kept for completeness; plane bending does not use it
    pub nu: f64,
}

impl Material {
    /// Create a new material with given properties
    pub fn new(e: f64, nu: f64) -> Self {
        Self {
            number: 1,
            name: "Material".to_string(),
            e,
            nu,
        }
    }

    /// Set the material name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the catalog number
    pub fn with_number(mut self, number: usize) -> Self {
        self.number = number;
        self
    }

    /// Structural steel in psi units (E = 29,000 ksi)
    pub fn steel_psi() -> Self {
        Self::new(29e6, 0.3).with_name("Steel")
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel_psi()
    }
}

fn default_number() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_steel() {
        let steel = Material::default();
        assert_eq!(steel.e, 29e6);
        assert_eq!(steel.number, 1);
        assert_eq!(steel.name, "Steel");
    }
}
