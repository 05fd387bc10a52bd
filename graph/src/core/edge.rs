/// A surviving edge of the reduced ancestry graph.
///
/// `source` is an ancestor of `target`; `commit_count` is the number of
/// commits between them, exclusive of the source and inclusive of the
/// target (`rev-list --count` semantics).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeightedEdge {
    pub source: usize,
    pub target: usize,
    pub commit_count: usize,
}
