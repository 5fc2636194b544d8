//! Indexing every page of a generated documentation site.

use super::{Catalog, PageExtractor};
use crate::error::{LoadError, Result};
use anyhow::Context;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// List the `.html` pages under `root`, sorted by path.
pub fn find_pages(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(LoadError::NotFound {
            path: root.to_path_buf(),
        }
        .into());
    }

    let mut pages = Vec::new();
    for entry in WalkBuilder::new(root).standard_filters(false).build() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "html") {
            pages.push(path.to_path_buf());
        }
    }
    pages.sort();
    Ok(pages)
}

/// Index every page under `root`.
///
/// A page that cannot be read is logged and skipped.
pub fn load_site(root: &Path, extractor: &PageExtractor) -> Result<Vec<Catalog>> {
    let pages = find_pages(root)?;
    let mut catalogs = Vec::with_capacity(pages.len());

    for page in pages {
        match std::fs::read_to_string(&page) {
            Ok(html) => {
                let source = page
                    .strip_prefix(root)
                    .unwrap_or(&page)
                    .display()
                    .to_string();
                catalogs.push(extractor.extract(&source, &html));
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable page {}: {}", page.display(), e);
            }
        }
    }

    tracing::info!(
        "Indexed {} pages ({} entries) under {}",
        catalogs.len(),
        catalogs.iter().map(Catalog::len).sum::<usize>(),
        root.display()
    );

    Ok(catalogs)
}
