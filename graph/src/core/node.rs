use std::collections::HashMap;

/// A revision of interest: a branch tip or a synthesized common ancestor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevNode {
    /// Full revision identifier (commit hash).
    pub id: String,
    /// Commit date, formatted for display. Empty when metadata could not
    /// be read.
    pub date: String,
    /// True if the node was discovered only as a common ancestor of two
    /// branches and is not itself one of the input branches.
    pub synthesized: bool,
    /// Input branch names resolving to this revision.
    pub names: Vec<String>,
}

impl RevNode {
    /// Short display name: a 10-character prefix of the identifier.
    pub fn short_name(&self) -> &str {
        self.id.get(..10).unwrap_or(&self.id)
    }
}

/// Arena of discovered nodes addressed by dense index.
///
/// Indices are assigned in discovery order and never change for the
/// lifetime of a run; they index the relation matrices directly.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<RevNode>,
    index_by_id: HashMap<String, usize>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of an already-discovered revision, if any.
    pub fn lookup(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    /// Add a node and return its index. The identity must not already be
    /// present; callers go through `lookup` first.
    pub fn push(&mut self, node: RevNode) -> usize {
        debug_assert!(!self.index_by_id.contains_key(&node.id));
        let index = self.nodes.len();
        self.index_by_id.insert(node.id.clone(), index);
        self.nodes.push(node);
        index
    }

    pub fn node(&self, index: usize) -> &RevNode {
        &self.nodes[index]
    }

    pub fn node_mut(&mut self, index: usize) -> &mut RevNode {
        &mut self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[RevNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<RevNode> {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> RevNode {
        RevNode {
            id: id.to_string(),
            date: String::new(),
            synthesized: false,
            names: Vec::new(),
        }
    }

    #[test]
    fn indices_follow_discovery_order() {
        let mut arena = NodeArena::new();
        assert_eq!(arena.push(node("aaa")), 0);
        assert_eq!(arena.push(node("bbb")), 1);
        assert_eq!(arena.lookup("aaa"), Some(0));
        assert_eq!(arena.lookup("bbb"), Some(1));
        assert_eq!(arena.lookup("ccc"), None);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn short_name_is_ten_char_prefix() {
        let long = node("0123456789abcdef");
        assert_eq!(long.short_name(), "0123456789");

        let short = node("abc");
        assert_eq!(short.short_name(), "abc");
    }
}
