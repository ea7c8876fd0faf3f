//! Graph data model shared by the registry, store, traversal, and explainer.

mod edge;
mod entity_type;
mod ids;
mod node;
mod property;
mod relation;

pub use edge::{check_unit, Edge, EdgeEvidence, EdgeWeights};
pub use entity_type::EntityType;
pub use ids::{EdgeId, NodeId};
pub use node::Node;
pub use property::{Properties, PropertyValue};
pub use relation::Relation;
