use crate::core::{BranchDag, NodeArena, RelationMatrix, RevNode, WeightedEdge};
use crate::source::RevisionSource;
use anyhow::Result;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Fatal pipeline errors. Per-query failures degrade the graph instead of
/// surfacing here.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Every input branch name failed to resolve.
    #[error("none of the {0} input branch names resolved to a revision")]
    NoBranchesResolved(usize),
}

/// Builds a [`BranchDag`] from a set of branch names.
///
/// The pipeline runs in five steps: resolve branch names to distinct
/// revisions, scan every pair for a common ancestor, complete the ancestor
/// relation with direct ancestry queries, reduce it to the minimal edge
/// set, and weight the surviving edges with commit counts.
pub struct DagBuilder<'a, S: RevisionSource> {
    source: &'a S,
    arena: NodeArena,
    // Timestamp cache, keyed by revision identity (several branch names
    // may share one revision).
    dates: HashMap<String, String>,
}

impl<'a, S: RevisionSource> DagBuilder<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            arena: NodeArena::new(),
            dates: HashMap::new(),
        }
    }

    /// Run the full pipeline.
    pub fn build(mut self, branch_names: &[String]) -> Result<BranchDag> {
        let resolved = self.resolve_branches(branch_names);
        if resolved.is_empty() {
            return Err(BuildError::NoBranchesResolved(branch_names.len()).into());
        }

        // Branch nodes are interned first, in lexicographic identity
        // order, so index assignment is deterministic across runs.
        let ids: Vec<String> = resolved.keys().cloned().collect();
        for (id, names) in &resolved {
            let index = self.intern(id, false);
            self.arena.node_mut(index).names = names.clone();
        }

        let facts = self.scan_pairs(&ids);
        let relation = self.complete_relation(&facts);
        let reduced = relation.transitive_reduction();
        debug!(
            "relation has {} entries, {} after reduction",
            relation.count(),
            reduced.count()
        );

        let edges = self.annotate_weights(&reduced);
        Ok(BranchDag::new(self.arena.into_nodes(), edges))
    }

    /// Map each branch name to a revision, dropping names that fail to
    /// resolve. Returns identity -> branch names, ordered by identity.
    fn resolve_branches(&mut self, names: &[String]) -> BTreeMap<String, Vec<String>> {
        let mut by_id: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for name in names {
            match self.source.resolve_branch(name) {
                Ok(meta) => {
                    debug!("resolved {name} -> {}", meta.id);
                    self.dates
                        .entry(meta.id.clone())
                        .or_insert_with(|| meta.date_string());
                    let entry = by_id.entry(meta.id).or_default();
                    if !entry.contains(name) {
                        entry.push(name.clone());
                    }
                }
                Err(err) => warn!("skipping branch {name}: {err:#}"),
            }
        }
        by_id
    }

    /// Query the common ancestor of every unordered pair of branch
    /// revisions and record the resulting ancestor facts. Synthesized
    /// ancestor nodes are interned here, in scan order.
    fn scan_pairs(&mut self, ids: &[String]) -> Vec<(usize, usize)> {
        let mut facts = Vec::new();
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                let (a, b) = (&ids[i], &ids[j]);
                let ancestor = match self.source.common_ancestor(a, b) {
                    Ok(Some(id)) => id,
                    Ok(None) => {
                        debug!("no common ancestor between {a} and {b}");
                        continue;
                    }
                    Err(err) => {
                        warn!("common-ancestor query failed for {a}..{b}: {err:#}");
                        continue;
                    }
                };

                let a_index = self.intern(a, false);
                let b_index = self.intern(b, false);
                let anc_index = self.intern(&ancestor, true);

                if anc_index == a_index {
                    facts.push((a_index, b_index));
                } else if anc_index == b_index {
                    facts.push((b_index, a_index));
                } else {
                    facts.push((anc_index, a_index));
                    facts.push((anc_index, b_index));
                }
            }
        }
        facts
    }

    /// Build the full ancestor relation over the final node set: seed it
    /// with the pairwise facts, then fill every remaining entry with a
    /// direct ancestry query. A failed query counts as "no relation".
    fn complete_relation(&self, facts: &[(usize, usize)]) -> RelationMatrix {
        let size = self.arena.len();
        debug!("completing ancestor relation over {size} nodes");

        let mut relation = RelationMatrix::new(size);
        for &(i, j) in facts {
            relation.set(i, j);
        }

        for i in 0..size {
            for j in 0..size {
                if i == j || relation.get(i, j) {
                    continue;
                }
                let known = match self
                    .source
                    .is_ancestor(&self.arena.node(i).id, &self.arena.node(j).id)
                {
                    Ok(known) => known,
                    Err(err) => {
                        warn!("ancestry query failed for ({i}, {j}): {err:#}");
                        false
                    }
                };
                if known {
                    trace!("ancestor: {i} -> {j}");
                    relation.set(i, j);
                }
            }
        }
        relation
    }

    /// Weight every reduced edge with its commit count. Zero-weight edges
    /// are dropped: two branches at the same revision have no visible
    /// edge.
    fn annotate_weights(&self, reduced: &RelationMatrix) -> Vec<WeightedEdge> {
        let mut edges = Vec::new();
        for (i, j) in reduced.pairs() {
            let count = match self
                .source
                .commit_count(&self.arena.node(i).id, &self.arena.node(j).id)
            {
                Ok(count) => count,
                Err(err) => {
                    warn!("commit-count query failed for ({i}, {j}): {err:#}");
                    0
                }
            };
            trace!("commit count {i} -> {j}: {count}");
            if count == 0 {
                debug!("dropping zero-weight edge {i} -> {j}");
                continue;
            }
            edges.push(WeightedEdge {
                source: i,
                target: j,
                commit_count: count,
            });
        }
        edges
    }

    /// Index for a revision, interning it on first sight. The synthesized
    /// flag sticks from first discovery: branch nodes are interned before
    /// any ancestor, so an ancestor that coincides with a branch keeps
    /// `synthesized == false`.
    fn intern(&mut self, id: &str, synthesized: bool) -> usize {
        if let Some(index) = self.arena.lookup(id) {
            return index;
        }
        let date = self.date_for(id);
        self.arena.push(RevNode {
            id: id.to_string(),
            date,
            synthesized,
            names: Vec::new(),
        })
    }

    fn date_for(&mut self, id: &str) -> String {
        if let Some(date) = self.dates.get(id) {
            return date.clone();
        }
        let date = match self.source.read_commit(id) {
            Ok(meta) => {
                trace!("read commit {id}: {}", meta.subject);
                meta.date_string()
            }
            Err(err) => {
                warn!("failed to read commit {id}: {err:#}");
                String::new()
            }
        };
        self.dates.insert(id.to_string(), date.clone());
        date
    }
}
