//! Beam definition as entered by the user

use serde::{Deserialize, Serialize};

use super::AnalysisOptions;
use crate::elements::{CrossSection, Material, Support};
use crate::error::{BeamError, BeamResult};
use crate::loads::{ConcentratedLoad, DistributedLoad};

/// A single-span or continuous prismatic beam with its supports and loads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamInput {
    pub length: f64,
    #[serde(default)]
    pub material: Material,
    pub section: CrossSection,
    pub supports: Vec<Support>,
    #[serde(default)]
    pub concentrated_loads: Vec<ConcentratedLoad>,
    #[serde(default)]
    pub distributed_loads: Vec<DistributedLoad>,
}

impl BeamInput {
    /// Start a beam of `length` with the given section; material defaults to steel
    pub fn builder(length: f64, section: CrossSection) -> BeamInputBuilder {
        BeamInputBuilder {
            input: BeamInput {
                length,
                material: Material::default(),
                section,
                supports: Vec::new(),
                concentrated_loads: Vec::new(),
                distributed_loads: Vec::new(),
            },
        }
    }

    /// Check the beam and the run options before anything is assembled
    pub fn validate(&self, options: &AnalysisOptions) -> BeamResult<()> {
        let length = self.length;
        positive("beam length", length)?;
        positive("modulus of elasticity", self.material.e)?;
        positive("moment of inertia", self.section.i)?;
        if !(self.material.nu > 0.0 && self.material.nu < 1.0) {
            return Err(BeamError::InvalidInput(format!(
                "Poisson's ratio must be between 0 and 1, got {}",
                self.material.nu
            )));
        }

        let seg = options.output_segment_length;
        if !(seg > 0.0 && seg <= length) {
            return Err(BeamError::InvalidInput(format!(
                "output segment length {} must be in (0, {}]",
                seg, length
            )));
        }
        let combine = options.combine_load_distance;
        if !(combine >= 0.0 && combine < seg) {
            return Err(BeamError::InvalidInput(format!(
                "combine load distance {} must be in [0, {})",
                combine, seg
            )));
        }

        self.validate_supports()?;

        for load in &self.concentrated_loads {
            on_beam("concentrated load", load.position, length)?;
            if !(load.force.is_finite() && load.moment.is_finite()) {
                return Err(BeamError::InvalidInput(format!(
                    "concentrated load at {} is not finite",
                    load.position
                )));
            }
        }

        for load in &self.distributed_loads {
            on_beam("distributed load", load.left_position, length)?;
            on_beam("distributed load", load.right_position, length)?;
            if load.left_position >= load.right_position {
                return Err(BeamError::InvalidInput(format!(
                    "distributed load starts at {} but ends at {}",
                    load.left_position, load.right_position
                )));
            }
            if !load.has_consistent_sign() {
                return Err(BeamError::InvalidInput(format!(
                    "distributed load from {} to {} changes sign",
                    load.left_position, load.right_position
                )));
            }
        }
        Ok(())
    }

    fn validate_supports(&self) -> BeamResult<()> {
        for (idx, support) in self.supports.iter().enumerate() {
            on_beam("support", support.position, self.length)?;
            if !support.is_restraining() {
                return Err(BeamError::InvalidInput(format!(
                    "support at {} leaves both displacement and rotation free",
                    support.position
                )));
            }
            if self.supports[..idx]
                .iter()
                .any(|s| s.position == support.position)
            {
                return Err(BeamError::InvalidInput(format!(
                    "more than one support at {}",
                    support.position
                )));
            }
        }

        match self.supports.as_slice() {
            [] => Err(BeamError::Unstable("the beam has no supports".to_string())),
            [only] if !only.is_fixed() => Err(BeamError::Unstable(format!(
                "a single support at {} must restrain displacement and rotation",
                only.position
            ))),
            _ => Ok(()),
        }
    }
}

fn positive(what: &str, value: f64) -> BeamResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(BeamError::InvalidInput(format!(
            "{} must be positive, got {}",
            what, value
        )))
    }
}

fn on_beam(what: &str, position: f64, length: f64) -> BeamResult<()> {
    if (0.0..=length).contains(&position) {
        Ok(())
    } else {
        Err(BeamError::InvalidInput(format!(
            "{} at {} is outside the beam [0, {}]",
            what, position, length
        )))
    }
}

/// Builder for [`BeamInput`]
#[derive(Debug, Clone)]
pub struct BeamInputBuilder {
    input: BeamInput,
}

impl BeamInputBuilder {
    pub fn material(mut self, material: Material) -> Self {
        self.input.material = material;
        self
    }

    pub fn support(mut self, support: Support) -> Self {
        self.input.supports.push(support);
        self
    }

    pub fn concentrated_load(mut self, load: ConcentratedLoad) -> Self {
        self.input.concentrated_loads.push(load);
        self
    }

    pub fn distributed_load(mut self, load: DistributedLoad) -> Self {
        self.input.distributed_loads.push(load);
        self
    }

    pub fn build(self) -> BeamInput {
        self.input
    }
}
