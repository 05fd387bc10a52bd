pub mod builder;
pub mod core;
pub mod git_backend;
pub mod source;

pub use builder::{BuildError, DagBuilder};
pub use core::{BranchDag, NodeArena, RelationMatrix, RevNode, WeightedEdge};
pub use git_backend::GitSource;
pub use source::{CommitMeta, RevisionSource};
