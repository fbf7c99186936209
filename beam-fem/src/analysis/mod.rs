//! Analysis options, input contract and the run pipeline

mod context;
mod input;

use serde::{Deserialize, Serialize};

use crate::error::BeamResult;
use crate::results::AnalysisResults;

pub use context::RunContext;
pub use input::{BeamInput, BeamInputBuilder};

/// Offset either side of a node at which one-sided shear and moment are taken
pub const NODE_OFFSET: f64 = 1e-4;

/// Distance a load is moved off a support it coincides with
pub const SUPPORT_OFFSET: f64 = 2.0 * NODE_OFFSET;

/// Tunables of one analysis run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Sampling interval of the plot tables and distributed load segments
    pub output_segment_length: f64,
    /// Loads closer than this are merged into one
    pub combine_load_distance: f64,
    /// Decimal places used when comparing positions and values
    pub round_digits: u32,
    /// Decimal places used to decide that a load sits on a support
    pub support_match_digits: u32,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            output_segment_length: 1.0,
            combine_load_distance: 0.01,
            round_digits: 5,
            support_match_digits: 12,
        }
    }
}

impl AnalysisOptions {
    pub fn with_segment_length(mut self, length: f64) -> Self {
        self.output_segment_length = length;
        self
    }

    pub fn with_combine_distance(mut self, distance: f64) -> Self {
        self.combine_load_distance = distance;
        self
    }

    pub fn with_round_digits(mut self, digits: u32) -> Self {
        self.round_digits = digits;
        self
    }

    pub fn with_support_match_digits(mut self, digits: u32) -> Self {
        self.support_match_digits = digits;
        self
    }
}

/// Validate, normalize, assemble, solve and post-process one beam
pub fn analyze(input: &BeamInput, options: &AnalysisOptions) -> BeamResult<AnalysisResults> {
    RunContext::run(input.clone(), *options)?.results()
}
