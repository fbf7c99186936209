//! Support conditions

use serde::{Deserialize, Serialize};

/// A support entered along the beam
///
/// The `*_free` flags follow the entry convention: `true` means the DOF is
/// enabled (free to move). Model matrices use the inverse, see
/// [`Support::restraints`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Support {
    /// Position along the beam
    pub position: f64,
    /// Vertical displacement is free
    pub displacement_free: bool,
    /// Rotation is free
    pub rotation_free: bool,
}

impl Support {
    pub fn new(position: f64, displacement_free: bool, rotation_free: bool) -> Self {
        Self {
            position,
            displacement_free,
            rotation_free,
        }
    }

    /// Pinned or roller support (displacement restrained, rotation free)
    pub fn pinned(position: f64) -> Self {
        Self::new(position, false, true)
    }

    /// Fully fixed support
    pub fn fixed(position: f64) -> Self {
        Self::new(position, false, false)
    }

    /// Guided support (rotation restrained, displacement free)
    pub fn guided(position: f64) -> Self {
        Self::new(position, true, false)
    }

    /// Restraint flags `[displacement, rotation]`, 1 = restrained, 0 = free
    pub fn restraints(&self) -> Restraint {
        Restraint {
            displacement: u8::from(!self.displacement_free),
            rotation: u8::from(!self.rotation_free),
        }
    }

    /// True if at least one DOF is restrained
    pub fn is_restraining(&self) -> bool {
        !(self.displacement_free && self.rotation_free)
    }

    pub fn is_fixed(&self) -> bool {
        !self.displacement_free && !self.rotation_free
    }
}

/// Matrix-convention restraint flags of a support node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Restraint {
    pub displacement: u8,
    pub rotation: u8,
}

impl Restraint {
    pub fn fixed() -> Self {
        Self {
            displacement: 1,
            rotation: 1,
        }
    }

    pub fn rotation_restrained(&self) -> bool {
        self.rotation == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restraint_flags_are_inverted() {
        let pin = Support::pinned(0.0);
        assert_eq!(pin.restraints(), Restraint { displacement: 1, rotation: 0 });
        assert_eq!(Support::fixed(0.0).restraints(), Restraint::fixed());
        let guided = Support::guided(5.0).restraints();
        assert_eq!((guided.displacement, guided.rotation), (0, 1));
    }

    #[test]
    fn test_free_support_restrains_nothing() {
        assert!(!Support::new(1.0, true, true).is_restraining());
        assert!(Support::pinned(1.0).is_restraining());
        assert!(Support::fixed(1.0).is_fixed());
    }
}
