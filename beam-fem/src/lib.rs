//! Beam FEM - plane bending analysis of straight beams in Rust
//!
//! Analyzes single-span and continuous prismatic Euler-Bernoulli beams with
//! the direct stiffness method:
//! - Concentrated forces and moments, uniform/triangular/trapezoidal line loads
//! - Pinned, fixed and guided supports anywhere along the beam
//! - Reactions, nodal displacements and rotations
//! - Shear, moment and deflection plot tables
//!
//! ## Example
//! ```rust
//! use beam_fem::prelude::*;
//!
//! let beam = BeamInput::builder(120.0, CrossSection::new(170.0))
//!     .material(Material::steel_psi())
//!     .support(Support::pinned(0.0))
//!     .support(Support::pinned(120.0))
//!     .concentrated_load(ConcentratedLoad::force(60.0, -80_000.0))
//!     .build();
//!
//! let results = analyze(&beam, &AnalysisOptions::default()).unwrap();
//!
//! // Each support carries half the load
//! let left = results.reaction_at(0.0, 5).unwrap();
//! assert!((left.force - 40_000.0).abs() < 1e-6);
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod model;
pub mod postprocess;
pub mod results;
pub mod scheme;
pub mod solver;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{
        analyze, AnalysisOptions, BeamInput, RunContext, NODE_OFFSET, SUPPORT_OFFSET,
    };
    pub use crate::elements::{CrossSection, Material, Support};
    pub use crate::error::{BeamError, BeamResult};
    pub use crate::loads::{ConcentratedLoad, DistributedLoad, NormalizationReport};
    pub use crate::postprocess::{PlotPoint, PlotTable, ValueResult};
    pub use crate::results::{
        AnalysisResults, AnalysisSummary, Extreme, NodeDisplacement, SupportReaction,
    };
}
