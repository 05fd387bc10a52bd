use super::{edge::WeightedEdge, node::RevNode};
use anyhow::{Context, Result};
use serde::Serialize;

/// The finished ancestry graph: nodes in discovery-index order plus the
/// nonzero-weight edges that survived transitive reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchDag {
    nodes: Vec<RevNode>,
    edges: Vec<WeightedEdge>,
}

#[derive(Debug, Serialize)]
struct NodeDoc {
    id: usize,
    date: String,
    inner: bool,
    names: Vec<String>,
    name: String,
}

#[derive(Debug, Serialize)]
struct LinkDoc {
    source: usize,
    target: usize,
    commit_count: usize,
}

#[derive(Debug, Serialize)]
struct GraphDoc {
    nodes: Vec<NodeDoc>,
    links: Vec<LinkDoc>,
}

impl BranchDag {
    pub fn new(nodes: Vec<RevNode>, edges: Vec<WeightedEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[RevNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn document(&self) -> GraphDoc {
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| NodeDoc {
                id: index,
                date: node.date.clone(),
                inner: node.synthesized,
                names: node.names.clone(),
                name: node.short_name().to_string(),
            })
            .collect();

        let links = self
            .edges
            .iter()
            .map(|edge| LinkDoc {
                source: edge.source,
                target: edge.target,
                commit_count: edge.commit_count,
            })
            .collect();

        GraphDoc { nodes, links }
    }

    /// Serialize to the pretty-printed `nodes`/`links` JSON document.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.document()).context("failed to serialize graph to JSON")
    }

    /// Single-line variant of [`BranchDag::to_json`].
    pub fn to_json_compact(&self) -> Result<String> {
        serde_json::to_string(&self.document()).context("failed to serialize graph to JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dag() -> BranchDag {
        let nodes = vec![
            RevNode {
                id: "aaaaaaaaaaaaaaaaaaaa".into(),
                date: "2024-03-01 10:00:00 +0000".into(),
                synthesized: false,
                names: vec!["main".into()],
            },
            RevNode {
                id: "bbbbbbbbbbbbbbbbbbbb".into(),
                date: "2024-03-02 10:00:00 +0000".into(),
                synthesized: true,
                names: vec![],
            },
        ];
        let edges = vec![WeightedEdge {
            source: 1,
            target: 0,
            commit_count: 3,
        }];
        BranchDag::new(nodes, edges)
    }

    #[test]
    fn document_shape() {
        let json = sample_dag().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let nodes = value["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0]["id"], 0);
        assert_eq!(nodes[0]["inner"], false);
        assert_eq!(nodes[0]["names"][0], "main");
        assert_eq!(nodes[0]["name"], "aaaaaaaaaa");
        assert_eq!(nodes[1]["inner"], true);

        let links = value["links"].as_array().unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0]["source"], 1);
        assert_eq!(links[0]["target"], 0);
        assert_eq!(links[0]["commit_count"], 3);
    }

    #[test]
    fn compact_json_is_single_line() {
        let json = sample_dag().to_json_compact().unwrap();
        assert!(!json.contains('\n'));
    }
}
