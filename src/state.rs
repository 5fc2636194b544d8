//! Shared state: parsed page cache and the currently open page.
//!
//! Parsed catalogs are kept in an LRU keyed by canonical path and revalidated
//! against an xxh3 digest of the page contents, so an edited page is re-indexed on
//! the next load while an unchanged one is served from memory.

use crate::catalog::{Catalog, PageExtractor};
use crate::config::Config;
use crate::error::{LoadError, Result};
use crate::placeholders::{self, GithubReleases};
use crate::render::PageState;
use crate::scheduler::{RunStatus, SearchScheduler};
use anyhow::Context;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use xxhash_rust::xxh3::xxh3_64;

struct CachedPage {
    digest: u64,
    catalog: Arc<Catalog>,
}

/// A page opened for searching.
#[derive(Debug)]
pub struct PageSession {
    pub path: PathBuf,
    pub scheduler: SearchScheduler<PageState>,
}

/// Result of a search against the open page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub status: RunStatus,
    /// `(id, name)` of every visible entry, in document order.
    pub visible: Vec<(String, String)>,
    /// Whether the "no matches" indicator is shown.
    pub no_matches: bool,
}

/// State shared by every tool call.
pub struct SiteState {
    config: Config,
    cache: RwLock<LruCache<PathBuf, CachedPage>>,
    current: RwLock<Option<Arc<PageSession>>>,
    releases: Option<GithubReleases>,
}

impl std::fmt::Debug for SiteState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteState")
            .field("config", &self.config)
            .field("has_releases", &self.releases.is_some())
            .finish_non_exhaustive()
    }
}

impl SiteState {
    pub fn new(config: Config) -> Result<Self> {
        let capacity = NonZeroUsize::new(config.cache.capacity)
            .context("cache.capacity must be at least 1")?;
        let releases = if config.placeholders.enabled {
            Some(GithubReleases::new(&config.placeholders)?)
        } else {
            None
        };

        Ok(Self {
            config,
            cache: RwLock::new(LruCache::new(capacity)),
            current: RwLock::new(None),
            releases,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load and index a page, using the cache when the contents are unchanged.
    pub async fn catalog(&self, path: &Path) -> Result<Arc<Catalog>> {
        let path = tokio::fs::canonicalize(path)
            .await
            .map_err(|_| LoadError::NotFound {
                path: path.to_path_buf(),
            })?;
        let html = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
        let digest = xxh3_64(html.as_bytes());

        {
            let mut cache = self.cache.write().await;
            if let Some(cached) = cache.get(&path)
                && cached.digest == digest
            {
                tracing::debug!("Cache hit for {}", path.display());
                return Ok(Arc::clone(&cached.catalog));
            }
        }

        let layout = self.config.layout.clone();
        let source = path.display().to_string();
        let start = std::time::Instant::now();
        // Parsing is CPU bound and the parsed document is not Send
        let catalog = tokio::task::spawn_blocking(move || -> Result<Catalog> {
            let extractor = PageExtractor::new(&layout)?;
            Ok(extractor.extract(&source, &html))
        })
        .await
        .context("Page indexing task panicked")??;
        tracing::info!(
            "Indexed {} entries from {} in {:?}",
            catalog.len(),
            path.display(),
            start.elapsed()
        );

        let catalog = Arc::new(catalog);
        self.cache.write().await.put(
            path,
            CachedPage {
                digest,
                catalog: Arc::clone(&catalog),
            },
        );
        Ok(catalog)
    }

    /// Make `path` the page searched by [`SiteState::search`].
    ///
    /// The page starts with every entry visible.
    pub async fn open_page(&self, path: &Path) -> Result<Arc<Catalog>> {
        let catalog = self.catalog(path).await?;
        let view = PageState::new(&catalog);
        let scheduler = SearchScheduler::new(
            Arc::clone(&catalog),
            view,
            self.config.search.settle_delay(),
        );

        *self.current.write().await = Some(Arc::new(PageSession {
            path: path.to_path_buf(),
            scheduler,
        }));
        Ok(catalog)
    }

    pub async fn current_page(&self) -> Option<Arc<PageSession>> {
        self.current.read().await.clone()
    }

    /// Submit search bar contents to the open page and wait for it to settle.
    pub async fn search(&self, raw: &str) -> Result<SearchReport> {
        let session = self
            .current_page()
            .await
            .context("No page open. Use load_page first.")?;

        let status = session
            .scheduler
            .submit(raw)
            .await
            .context("Search task panicked")?;

        let report = session
            .scheduler
            .inspect(|page| {
                let visible = page
                    .view
                    .visible_entries()
                    .into_iter()
                    .filter_map(|id| page.catalog.entry(id))
                    .map(|entry| (entry.id.clone(), entry.name.clone()))
                    .collect();
                SearchReport {
                    status,
                    visible,
                    no_matches: page.view.indicator_count() > 0,
                }
            })
            .await;
        Ok(report)
    }

    /// Expand placeholders, or return the text unchanged when expansion is disabled.
    pub async fn expand_placeholders(&self, text: &str) -> String {
        match &self.releases {
            Some(releases) => placeholders::expand(text, releases).await,
            None => text.to_string(),
        }
    }
}
