//! Loads applied to the beam and their normalization into analysis nodes

mod distributed;
pub mod normalize;
mod point_load;

pub use distributed::{DistributedLoad, SimulatedLoad};
pub use normalize::{build_node_list, normalize_loads, NormalizationReport, NormalizedLoads};
pub use point_load::ConcentratedLoad;
