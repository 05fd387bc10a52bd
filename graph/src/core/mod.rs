pub mod dag;
pub mod edge;
pub mod node;
pub mod relation;

pub use dag::BranchDag;
pub use edge::WeightedEdge;
pub use node::{NodeArena, RevNode};
pub use relation::RelationMatrix;
