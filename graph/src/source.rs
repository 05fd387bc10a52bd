use anyhow::Result;
use chrono::{DateTime, FixedOffset};

/// Metadata for a single commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMeta {
    /// Full commit hash.
    pub id: String,
    /// Author-local commit time.
    pub date: DateTime<FixedOffset>,
    /// First line of the commit message.
    pub subject: String,
}

impl CommitMeta {
    /// Display form of the commit time, matching git's `%ci` pretty
    /// format (`2024-03-01 10:00:00 +0100`).
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d %H:%M:%S %z").to_string()
    }
}

/// The version-control queries the graph pipeline needs, all against one
/// fixed repository.
///
/// Every call is a blocking round trip. `Err` from any method is treated
/// by the pipeline as a recoverable per-entry failure, not a reason to
/// abort the run.
pub trait RevisionSource {
    /// Resolve a branch name to the commit it points at.
    fn resolve_branch(&self, name: &str) -> Result<CommitMeta>;

    /// Most recent common ancestor of two revisions, or `None` when the
    /// histories are unrelated.
    fn common_ancestor(&self, a: &str, b: &str) -> Result<Option<String>>;

    /// Whether `ancestor` precedes `descendant` in history.
    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool>;

    /// Number of commits reachable from `descendant` but not from
    /// `ancestor` (`rev-list --count ancestor..descendant`).
    fn commit_count(&self, ancestor: &str, descendant: &str) -> Result<usize>;

    /// Metadata for a revision by its full identifier.
    fn read_commit(&self, id: &str) -> Result<CommitMeta>;
}
