// ABOUTME: Version-control metadata used to resolve dynamic footer tokens
// ABOUTME: Reads the repository with gix; a missing repository is a normal outcome, not an error

use chrono::{DateTime, Utc};
use log::debug;
use std::path::{Path, PathBuf};

/// Snapshot of the repository state at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionControlInfo {
    pub branch: String,
    pub short_id: String,
    /// Tag pointing at the current commit, if any.
    pub head_tag: Option<String>,
    pub committed_at: DateTime<Utc>,
}

impl VersionControlInfo {
    /// The tag name when a tag points at HEAD, otherwise the short commit id.
    pub fn resolved_id(&self) -> &str {
        self.head_tag.as_deref().unwrap_or(&self.short_id)
    }
}

/// Source of version-control metadata.
///
/// `None` means there is no repository to ask.
pub trait VersionControl {
    fn snapshot(&self) -> Option<VersionControlInfo>;
}

/// Provider that never finds a repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVersionControl;

impl VersionControl for NoVersionControl {
    fn snapshot(&self) -> Option<VersionControlInfo> {
        None
    }
}

/// Provider returning a fixed snapshot.
#[derive(Debug, Clone)]
pub struct StaticVersionControl(pub VersionControlInfo);

impl VersionControl for StaticVersionControl {
    fn snapshot(&self) -> Option<VersionControlInfo> {
        Some(self.0.clone())
    }
}

/// Reads repository state with `gix`, discovering the repository upward
/// from a working directory.
#[derive(Debug, Clone)]
pub struct GitRepository {
    workdir: PathBuf,
}

impl GitRepository {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Use the directory containing `path`, or the current directory.
    pub fn for_document(path: &Path) -> Self {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Self::new(parent),
            _ => Self::new("."),
        }
    }
}

/// Name of a tag whose target peels to `head`. With several, the greatest
/// name wins so `v1.1` is preferred over `v1.0` on the same commit.
fn tag_at(repo: &gix::Repository, head: gix::ObjectId) -> Option<String> {
    let references = match repo.references() {
        Ok(references) => references,
        Err(e) => {
            debug!("Failed to read references: {}", e);
            return None;
        }
    };
    let tags = match references.tags() {
        Ok(tags) => tags,
        Err(e) => {
            debug!("Failed to list tags: {}", e);
            return None;
        }
    };

    tags.flatten()
        .filter(|tag| {
            let spec = format!("{}^{{commit}}", tag.name().as_bstr());
            repo.rev_parse_single(spec.as_str())
                .map(|id| id.detach() == head)
                .unwrap_or(false)
        })
        .map(|tag| tag.name().shorten().to_string())
        .max()
}

impl VersionControl for GitRepository {
    fn snapshot(&self) -> Option<VersionControlInfo> {
        let repo = match gix::discover(&self.workdir) {
            Ok(repo) => repo,
            Err(e) => {
                debug!("No git repository above {:?}: {}", self.workdir, e);
                return None;
            }
        };

        let commit = match repo.head_commit() {
            Ok(commit) => commit,
            Err(e) => {
                debug!("HEAD does not point at a commit: {}", e);
                return None;
            }
        };

        // Detached HEAD has no ref name
        let branch = repo
            .head_name()
            .ok()
            .flatten()
            .map(|name| name.shorten().to_string())
            .unwrap_or_else(|| "HEAD".to_string());
        let short_id = commit.id().shorten().ok()?.to_string();
        let head_tag = tag_at(&repo, commit.id);
        let committed_at = DateTime::<Utc>::from_timestamp(commit.time().ok()?.seconds, 0)?;

        Some(VersionControlInfo {
            branch,
            short_id,
            head_tag,
            committed_at,
        })
    }
}
