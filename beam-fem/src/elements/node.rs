//! Analysis node - a point on the beam axis carrying two DOFs

use serde::{Deserialize, Serialize};

use super::support::Restraint;

/// What a node represents in the model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Support node with restraint flags
    Support(Restraint),
    /// Load node with applied vertical force (down negative) and moment (clockwise negative)
    Load { force: f64, moment: f64 },
}

/// A node of the beam model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// 1-based node number, assigned after the final sort
    pub number: usize,
    /// Position along the beam
    pub position: f64,
    pub kind: NodeKind,
}

impl Node {
    /// Create an unnumbered support node
    pub fn support(position: f64, restraint: Restraint) -> Self {
        Self {
            number: 0,
            position,
            kind: NodeKind::Support(restraint),
        }
    }

    /// Create an unnumbered load node
    pub fn load(position: f64, force: f64, moment: f64) -> Self {
        Self {
            number: 0,
            position,
            kind: NodeKind::Load { force, moment },
        }
    }

    pub fn is_support(&self) -> bool {
        matches!(self.kind, NodeKind::Support(_))
    }

    /// Restraint flags, `None` for load nodes
    pub fn restraint(&self) -> Option<Restraint> {
        match self.kind {
            NodeKind::Support(r) => Some(r),
            NodeKind::Load { .. } => None,
        }
    }

    /// Applied `(force, moment)`; support nodes carry none
    pub fn applied(&self) -> (f64, f64) {
        match self.kind {
            NodeKind::Support(_) => (0.0, 0.0),
            NodeKind::Load { force, moment } => (force, moment),
        }
    }

    /// Global index of the displacement DOF (0-based)
    pub fn displacement_dof(&self) -> usize {
        2 * (self.number - 1)
    }

    /// Global index of the rotation DOF (0-based)
    pub fn rotation_dof(&self) -> usize {
        2 * (self.number - 1) + 1
    }
}
