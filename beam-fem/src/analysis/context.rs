//! One analysis run and everything it produced

use log::{debug, info};

use super::{AnalysisOptions, BeamInput};
use crate::error::{BeamError, BeamResult};
use crate::loads::{build_node_list, normalize_loads, NormalizedLoads};
use crate::math::round_to;
use crate::model::Model;
use crate::postprocess::{PostProcessor, ValueResult};
use crate::results::{AnalysisResults, AnalysisSummary, NodeDisplacement, SupportReaction};
use crate::scheme::Scheme;
use crate::solver::{self, Solution};

/// Snapshot of the input plus all intermediate results of a run
#[derive(Debug, Clone)]
pub struct RunContext {
    input: BeamInput,
    options: AnalysisOptions,
    normalized: NormalizedLoads,
    scheme: Scheme,
    model: Model,
    solution: Solution,
}

impl RunContext {
    /// Validate the input and run normalization, assembly and the solve
    pub fn run(input: BeamInput, options: AnalysisOptions) -> BeamResult<Self> {
        input.validate(&options)?;

        let normalized = normalize_loads(&input, &options);
        let nodes = build_node_list(&input.supports, &normalized.loads, input.length);
        let scheme = Scheme::build(input.material.clone(), input.section.clone(), nodes)?;
        let model = Model::assemble(&scheme)?;
        let solution = solver::solve(&model)?;

        info!(
            "analyzed beam of length {} with {} nodes and {} loads",
            input.length,
            scheme.node_count(),
            normalized.loads.len()
        );

        Ok(Self {
            input,
            options,
            normalized,
            scheme,
            model,
            solution,
        })
    }

    pub fn input(&self) -> &BeamInput {
        &self.input
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub fn normalized(&self) -> &NormalizedLoads {
        &self.normalized
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn post_processor(&self) -> BeamResult<PostProcessor<'_>> {
        PostProcessor::new(
            &self.scheme,
            &self.model,
            &self.solution,
            &self.input.concentrated_loads,
            self.options.round_digits,
        )
    }

    pub fn shear_at(&self, x: f64) -> BeamResult<ValueResult> {
        Ok(self.post_processor()?.shear_at(x))
    }

    pub fn moment_at(&self, x: f64) -> BeamResult<ValueResult> {
        Ok(self.post_processor()?.moment_at(x))
    }

    pub fn deflection_at(&self, x: f64) -> BeamResult<f64> {
        Ok(self.post_processor()?.deflection_at(x))
    }

    /// Displacement and rotation of a 1-based node
    pub fn node_displacement(&self, node: usize) -> BeamResult<NodeDisplacement> {
        let position = self
            .scheme
            .node(node)
            .map(|n| n.position)
            .ok_or_else(|| BeamError::InvalidInput(format!("node {} does not exist", node)))?;
        let (displacement, rotation) = self
            .solution
            .displacement_at(node)
            .ok_or_else(|| BeamError::InvalidInput(format!("node {} has no solution", node)))?;
        Ok(NodeDisplacement {
            node,
            position,
            displacement,
            rotation,
        })
    }

    /// Reactions at every support node, rounded to `round_digits`
    pub fn reactions(&self) -> Vec<SupportReaction> {
        let digits = self.options.round_digits;
        self.scheme
            .nodes
            .iter()
            .filter(|n| n.is_support())
            .filter_map(|n| {
                let (force, moment) = self.solution.reaction_at(n.number)?;
                Some(SupportReaction {
                    position: n.position,
                    force: clean(round_to(force, digits)),
                    moment: clean(round_to(moment, digits)),
                })
            })
            .collect()
    }

    /// Build the plot tables, reactions and summary
    pub fn results(&self) -> BeamResult<AnalysisResults> {
        let pp = self.post_processor()?;
        let seg = self.options.output_segment_length;
        let shear = pp.shear_table(seg);
        let moment = pp.moment_table(seg);
        let deflection = pp.deflection_table(seg);
        debug!(
            "tables built: {} shear, {} moment, {} deflection points",
            shear.len(),
            moment.len(),
            deflection.len()
        );

        let summary = AnalysisSummary::from_tables(
            &shear,
            &moment,
            &deflection,
            self.scheme.node_count(),
            self.scheme.elements.len(),
        );
        Ok(AnalysisResults {
            shear,
            moment,
            deflection,
            reactions: self.reactions(),
            loads_used: self.normalized.loads.clone(),
            report: self.normalized.report,
            summary,
        })
    }
}

/// Turn a negative zero into zero
fn clean(value: f64) -> f64 {
    value + 0.0
}
