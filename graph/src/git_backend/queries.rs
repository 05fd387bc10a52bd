use crate::source::{CommitMeta, RevisionSource};
use anyhow::{Context, Result};
use chrono::{FixedOffset, TimeZone, Utc};
use git2::{BranchType, ErrorCode, Oid, Repository};
use std::path::Path;

/// Libgit2-backed implementation of [`RevisionSource`].
pub struct GitSource {
    repo: Repository,
}

impl GitSource {
    /// Open the repository at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::open(path)
            .with_context(|| format!("failed to open repository at {}", path.display()))?;
        Ok(Self { repo })
    }

    /// Names of all local branches, sorted.
    pub fn list_branches(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for branch in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn find(&self, id: &str) -> Result<git2::Commit<'_>> {
        let oid = Oid::from_str(id).with_context(|| format!("invalid revision id {id}"))?;
        self.repo
            .find_commit(oid)
            .with_context(|| format!("no commit {id} in repository"))
    }

    fn commit_meta(&self, commit: &git2::Commit<'_>) -> Result<CommitMeta> {
        let time = commit.time();
        let offset = FixedOffset::east_opt(time.offset_minutes() * 60)
            .with_context(|| format!("invalid utc offset on commit {}", commit.id()))?;
        let date = Utc
            .timestamp_opt(time.seconds(), 0)
            .single()
            .with_context(|| format!("invalid timestamp on commit {}", commit.id()))?
            .with_timezone(&offset);

        Ok(CommitMeta {
            id: commit.id().to_string(),
            date,
            subject: commit.summary().unwrap_or("").to_string(),
        })
    }
}

impl RevisionSource for GitSource {
    fn resolve_branch(&self, name: &str) -> Result<CommitMeta> {
        let object = self
            .repo
            .revparse_single(name)
            .with_context(|| format!("cannot resolve {name}"))?;
        let commit = object
            .peel_to_commit()
            .with_context(|| format!("{name} does not point at a commit"))?;
        self.commit_meta(&commit)
    }

    fn common_ancestor(&self, a: &str, b: &str) -> Result<Option<String>> {
        let a = Oid::from_str(a).with_context(|| format!("invalid revision id {a}"))?;
        let b = Oid::from_str(b).with_context(|| format!("invalid revision id {b}"))?;
        match self.repo.merge_base(a, b) {
            Ok(oid) => Ok(Some(oid.to_string())),
            // Unrelated histories: not an error, just no relation.
            Err(err) if err.code() == ErrorCode::NotFound => Ok(None),
            Err(err) => Err(err).context("merge-base query failed"),
        }
    }

    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool> {
        let ancestor = Oid::from_str(ancestor)
            .with_context(|| format!("invalid revision id {ancestor}"))?;
        let descendant = Oid::from_str(descendant)
            .with_context(|| format!("invalid revision id {descendant}"))?;
        self.repo
            .graph_descendant_of(descendant, ancestor)
            .context("ancestry query failed")
    }

    fn commit_count(&self, ancestor: &str, descendant: &str) -> Result<usize> {
        let mut walk = self.repo.revwalk()?;
        walk.push(
            Oid::from_str(descendant)
                .with_context(|| format!("invalid revision id {descendant}"))?,
        )?;
        walk.hide(
            Oid::from_str(ancestor).with_context(|| format!("invalid revision id {ancestor}"))?,
        )?;

        let mut count = 0;
        for oid in walk {
            oid?;
            count += 1;
        }
        Ok(count)
    }

    fn read_commit(&self, id: &str) -> Result<CommitMeta> {
        let commit = self.find(id)?;
        self.commit_meta(&commit)
    }
}
