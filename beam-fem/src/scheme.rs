//! Static scheme - the catalog of entities one analysis run works on
//!
//! A scheme is rebuilt from the normalized node list for every run and is not
//! modified once the model assembler has consumed it.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::elements::{CrossSection, Element, Material, Node};
use crate::error::{BeamError, BeamResult};

/// Load entry of a non-support node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodalLoad {
    /// 1-based load number
    pub number: usize,
    /// Node the load acts on
    pub node: usize,
    pub force: f64,
    pub moment: f64,
}

/// Catalog of materials, sections, nodes, elements and loads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheme {
    pub materials: Vec<Material>,
    pub sections: Vec<CrossSection>,
    /// Nodes sorted by position, numbered from 1
    pub nodes: Vec<Node>,
    /// Element i joins node i to node i + 1
    pub elements: Vec<Element>,
    pub loads: Vec<NodalLoad>,
}

impl Scheme {
    /// Build the catalog from a sorted, numbered node list.
    ///
    /// Every element uses material 1 and section 1.
    pub fn build(material: Material, section: CrossSection, nodes: Vec<Node>) -> BeamResult<Self> {
        if nodes.len() < 2 {
            return Err(BeamError::InvalidGeometry(format!(
                "a beam needs at least two nodes, found {}",
                nodes.len()
            )));
        }

        let elements: Vec<Element> = nodes
            .windows(2)
            .enumerate()
            .map(|(idx, pair)| {
                Element::new(
                    idx + 1,
                    pair[0].number,
                    pair[1].number,
                    (pair[1].position - pair[0].position).abs(),
                )
            })
            .collect();

        let loads: Vec<NodalLoad> = nodes
            .iter()
            .filter(|n| !n.is_support())
            .enumerate()
            .map(|(idx, n)| {
                let (force, moment) = n.applied();
                NodalLoad {
                    number: idx + 1,
                    node: n.number,
                    force,
                    moment,
                }
            })
            .collect();

        debug!(
            "scheme built: {} nodes, {} elements, {} loads",
            nodes.len(),
            elements.len(),
            loads.len()
        );

        Ok(Self {
            materials: vec![material.with_number(1)],
            sections: vec![section.with_number(1)],
            nodes,
            elements,
            loads,
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of global DOFs (two per node)
    pub fn dof_count(&self) -> usize {
        2 * self.nodes.len()
    }

    /// Look up a node by its 1-based number
    pub fn node(&self, number: usize) -> Option<&Node> {
        number.checked_sub(1).and_then(|idx| self.nodes.get(idx))
    }

    pub fn material(&self, number: usize) -> Option<&Material> {
        self.materials.iter().find(|m| m.number == number)
    }

    pub fn section(&self, number: usize) -> Option<&CrossSection> {
        self.sections.iter().find(|s| s.number == number)
    }

    /// Positions of all nodes, in node order
    pub fn positions(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.position).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Support;
    use crate::loads::{build_node_list, ConcentratedLoad};

    fn sample_scheme() -> Scheme {
        let supports = [Support::pinned(0.0), Support::pinned(120.0)];
        let loads = [
            ConcentratedLoad::force(30.0, -10.0),
            ConcentratedLoad::moment(60.0, 5.0),
        ];
        let nodes = build_node_list(&supports, &loads, 120.0);
        Scheme::build(Material::default(), CrossSection::new(170.0), nodes).unwrap()
    }

    #[test]
    fn test_elements_join_consecutive_nodes() {
        let scheme = sample_scheme();
        assert_eq!(scheme.node_count(), 4);
        assert_eq!(scheme.elements.len(), 3);
        for (idx, el) in scheme.elements.iter().enumerate() {
            assert_eq!(el.number, idx + 1);
            assert_eq!(el.left, idx + 1);
            assert_eq!(el.right, idx + 2);
            assert_eq!(el.material, 1);
            assert_eq!(el.section, 1);
        }
        assert_eq!(scheme.elements[0].length, 30.0);
        assert_eq!(scheme.elements[2].length, 60.0);
    }

    #[test]
    fn test_one_load_per_non_support_node() {
        let scheme = sample_scheme();
        assert_eq!(scheme.loads.len(), 2);
        assert_eq!(scheme.loads[0].node, 2);
        assert_eq!(scheme.loads[0].force, -10.0);
        assert_eq!(scheme.loads[1].node, 3);
        assert_eq!(scheme.loads[1].moment, 5.0);
        assert_eq!(scheme.loads[1].number, 2);
    }

    #[test]
    fn test_lookup() {
        let scheme = sample_scheme();
        assert_eq!(scheme.node(1).map(|n| n.position), Some(0.0));
        assert!(scheme.node(0).is_none());
        assert!(scheme.node(5).is_none());
        assert_eq!(scheme.material(1).map(|m| m.e), Some(29e6));
        assert_eq!(scheme.section(1).map(|s| s.i), Some(170.0));
        assert_eq!(scheme.dof_count(), 8);
    }

    #[test]
    fn test_single_node_is_rejected() {
        let nodes = build_node_list(&[], &[], 0.0);
        assert!(Scheme::build(Material::default(), CrossSection::new(1.0), nodes).is_err());
    }
}
