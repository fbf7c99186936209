//! Result types of a beam analysis

use serde::{Deserialize, Serialize};

use crate::loads::{ConcentratedLoad, NormalizationReport};
use crate::postprocess::{PlotPoint, PlotTable};

/// Displacement and rotation at a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// 1-based node number
    pub node: usize,
    pub position: f64,
    /// Vertical displacement
    pub displacement: f64,
    pub rotation: f64,
}

/// Reaction force and moment at a support
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportReaction {
    pub position: f64,
    pub force: f64,
    pub moment: f64,
}

/// Largest absolute value of a table and where it occurs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extreme {
    pub position: f64,
    pub value: f64,
}

impl From<PlotPoint> for Extreme {
    fn from(p: PlotPoint) -> Self {
        Self {
            position: p.position,
            value: p.value,
        }
    }
}

/// Headline numbers of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub max_shear: Option<Extreme>,
    pub max_moment: Option<Extreme>,
    pub max_deflection: Option<Extreme>,
    pub node_count: usize,
    pub element_count: usize,
    pub dof_count: usize,
}

impl AnalysisSummary {
    pub fn from_tables(
        shear: &PlotTable,
        moment: &PlotTable,
        deflection: &PlotTable,
        node_count: usize,
        element_count: usize,
    ) -> Self {
        Self {
            max_shear: shear.max_abs().map(Extreme::from),
            max_moment: moment.max_abs().map(Extreme::from),
            max_deflection: deflection.max_abs().map(Extreme::from),
            node_count,
            element_count,
            dof_count: 2 * node_count,
        }
    }
}

/// Complete output of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub shear: PlotTable,
    pub moment: PlotTable,
    pub deflection: PlotTable,
    /// One entry per support, in position order
    pub reactions: Vec<SupportReaction>,
    /// Concentrated loads after normalization, as applied to the model
    pub loads_used: Vec<ConcentratedLoad>,
    pub report: NormalizationReport,
    pub summary: AnalysisSummary,
}

impl AnalysisResults {
    /// Reaction of the support at `position`, matched at `digits` decimal places
    pub fn reaction_at(&self, position: f64, digits: u32) -> Option<&SupportReaction> {
        self.reactions
            .iter()
            .find(|r| crate::math::equal_by_rounding(r.position, position, digits))
    }

    /// Sum of the reaction forces
    pub fn total_reaction(&self) -> f64 {
        self.reactions.iter().map(|r| r.force).sum()
    }

    /// Sum of the applied vertical forces
    pub fn total_load(&self) -> f64 {
        self.loads_used.iter().map(|l| l.force).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_tables() {
        let shear = PlotTable::from(vec![
            PlotPoint { position: 0.0, value: 10.0 },
            PlotPoint { position: 5.0, value: -12.0 },
        ]);
        let empty = PlotTable::default();
        let summary = AnalysisSummary::from_tables(&shear, &empty, &empty, 3, 2);
        let max = summary.max_shear.unwrap();
        assert_eq!((max.position, max.value), (5.0, -12.0));
        assert!(summary.max_moment.is_none());
        assert_eq!(summary.dof_count, 6);
    }

    #[test]
    fn test_reaction_lookup_and_totals() {
        let results = AnalysisResults {
            shear: PlotTable::default(),
            moment: PlotTable::default(),
            deflection: PlotTable::default(),
            reactions: vec![
                SupportReaction { position: 0.0, force: 30.0, moment: 0.0 },
                SupportReaction { position: 10.0, force: 70.0, moment: 0.0 },
            ],
            loads_used: vec![ConcentratedLoad::force(7.0, -100.0)],
            report: NormalizationReport::default(),
            summary: AnalysisSummary::from_tables(
                &PlotTable::default(),
                &PlotTable::default(),
                &PlotTable::default(),
                3,
                2,
            ),
        };
        assert_eq!(results.reaction_at(10.0, 5).map(|r| r.force), Some(70.0));
        assert!(results.reaction_at(5.0, 5).is_none());
        assert_eq!(results.total_reaction() + results.total_load(), 0.0);
    }
}
