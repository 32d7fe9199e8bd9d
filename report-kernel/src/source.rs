//! Data-access seam for synchronized user lists.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use report_primitives::SiteId;
use thiserror::Error;

/// Result alias for data-source lookups.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors surfaced by user data sources.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The backing store could not be reached.
    #[error("user source unavailable: {reason}")]
    Unavailable {
        /// Human-readable context provided by the backend.
        reason: String,
    },
    /// The lookup query itself failed.
    #[error("user query failed: {reason}")]
    Query {
        /// Human-readable context provided by the backend.
        reason: String,
    },
}

impl SourceError {
    /// Convenience helper to construct availability errors.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Convenience helper to construct query errors.
    #[must_use]
    pub fn query(reason: impl Into<String>) -> Self {
        Self::Query {
            reason: reason.into(),
        }
    }
}

/// Store holding the JSON-encoded user list captured by the last sync of
/// each site.
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Returns the stored JSON blob for `site`, or `None` when nothing has
    /// been synchronized.
    async fn fetch_users_json(&self, site: SiteId) -> SourceResult<Option<String>>;
}

/// In-process source keyed by site id.
#[derive(Default)]
pub struct InMemoryUserSource {
    inner: RwLock<HashMap<SiteId, String>>,
}

impl fmt::Debug for InMemoryUserSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut sites: Vec<_> = inner.keys().copied().collect();
        sites.sort_unstable();
        f.debug_struct("InMemoryUserSource")
            .field("sites", &sites)
            .finish()
    }
}

impl InMemoryUserSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `users_json` for `site`, replacing any previous blob.
    pub fn insert(&self, site: SiteId, users_json: impl Into<String>) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(site, users_json.into());
    }

    /// Drops the blob stored for `site`.
    pub fn remove(&self, site: SiteId) -> Option<String> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&site)
    }
}

#[async_trait]
impl UserSource for InMemoryUserSource {
    async fn fetch_users_json(&self, site: SiteId) -> SourceResult<Option<String>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| SourceError::unavailable("in-memory user store poisoned"))?;
        Ok(inner.get(&site).cloned())
    }
}

/// Adapts a synchronous lookup closure, such as a direct table read or a
/// call into the host's data accessor.
pub struct FnUserSource<F> {
    lookup: F,
}

impl<F> FnUserSource<F>
where
    F: Fn(SiteId) -> SourceResult<Option<String>> + Send + Sync,
{
    /// Wraps `lookup`.
    #[must_use]
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }
}

impl<F> fmt::Debug for FnUserSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnUserSource").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F> UserSource for FnUserSource<F>
where
    F: Fn(SiteId) -> SourceResult<Option<String>> + Send + Sync,
{
    async fn fetch_users_json(&self, site: SiteId) -> SourceResult<Option<String>> {
        (self.lookup)(site)
    }
}
