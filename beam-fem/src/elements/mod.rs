//! Beam model entities

mod element;
mod material;
mod node;
mod section;
mod support;

pub use element::Element;
pub use material::Material;
pub use node::{Node, NodeKind};
pub use section::CrossSection;
pub use support::{Restraint, Support};
