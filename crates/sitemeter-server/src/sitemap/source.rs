//! Identifier sources.
//!
//! A roadmap or best-practice identifier is the name of one entry in a content
//! directory. `DirectorySource` lists those directories on every call;
//! `CachedSource` memoizes any source for the process lifetime; `StaticSource`
//! serves fixed in-memory lists.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::OnceCell;

use sitemeter_core::error::{IdentifierSet, Result, SiteError};

/// Supplies the two identifier sets. Implementations must be read-only.
#[async_trait]
pub trait IdentifierSource: Send + Sync {
    async fn roadmap_ids(&self) -> Result<Vec<String>>;
    async fn best_practice_ids(&self) -> Result<Vec<String>>;
}

/// Identifiers from two directory listings.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    roadmaps_dir: PathBuf,
    best_practices_dir: PathBuf,
}

impl DirectorySource {
    /// Resolve relative directories against `base` (usually the working directory).
    /// Absolute directories are used as given.
    pub fn rooted(base: &Path, roadmaps_dir: &str, best_practices_dir: &str) -> Self {
        Self {
            roadmaps_dir: base.join(roadmaps_dir),
            best_practices_dir: base.join(best_practices_dir),
        }
    }
}

/// Sorted entry names of `dir`. Files and directories both count.
async fn list_names(set: IdentifierSet, dir: &Path) -> Result<Vec<String>> {
    let unavailable = |e: std::io::Error| {
        tracing::warn!(%set, dir = %dir.display(), error = %e, "identifier listing failed");
        SiteError::source_unavailable(set, dir.display().to_string(), &e)
    };

    let mut rd = tokio::fs::read_dir(dir).await.map_err(unavailable)?;
    let mut names = Vec::new();
    while let Some(entry) = rd.next_entry().await.map_err(unavailable)? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    tracing::debug!(%set, dir = %dir.display(), count = names.len(), "identifiers listed");
    Ok(names)
}

#[async_trait]
impl IdentifierSource for DirectorySource {
    async fn roadmap_ids(&self) -> Result<Vec<String>> {
        list_names(IdentifierSet::Roadmaps, &self.roadmaps_dir).await
    }

    async fn best_practice_ids(&self) -> Result<Vec<String>> {
        list_names(IdentifierSet::BestPractices, &self.best_practices_dir).await
    }
}

/// Fixed in-memory identifier lists.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub roadmaps: Vec<String>,
    pub best_practices: Vec<String>,
}

impl StaticSource {
    pub fn new<R, B>(roadmaps: R, best_practices: B) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        Self {
            roadmaps: roadmaps.into_iter().map(Into::into).collect(),
            best_practices: best_practices.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl IdentifierSource for StaticSource {
    async fn roadmap_ids(&self) -> Result<Vec<String>> {
        Ok(self.roadmaps.clone())
    }

    async fn best_practice_ids(&self) -> Result<Vec<String>> {
        Ok(self.best_practices.clone())
    }
}

/// Reads each set from `inner` at most once successfully; failures are retried.
pub struct CachedSource<S> {
    inner: S,
    roadmaps: OnceCell<Vec<String>>,
    best_practices: OnceCell<Vec<String>>,
}

impl<S: IdentifierSource> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            roadmaps: OnceCell::new(),
            best_practices: OnceCell::new(),
        }
    }
}

#[async_trait]
impl<S: IdentifierSource> IdentifierSource for CachedSource<S> {
    async fn roadmap_ids(&self) -> Result<Vec<String>> {
        self.roadmaps
            .get_or_try_init(|| self.inner.roadmap_ids())
            .await
            .cloned()
    }

    async fn best_practice_ids(&self) -> Result<Vec<String>> {
        self.best_practices
            .get_or_try_init(|| self.inner.best_practice_ids())
            .await
            .cloned()
    }
}
