//! Building a [`Catalog`] from page HTML.

use super::{Catalog, Entry, NavLink};
use crate::config::SiteLayout;
use crate::error::LoadError;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// Compiled layout selectors.
#[derive(Debug)]
pub struct PageExtractor {
    entry: Selector,
    title: Selector,
    snippet: Selector,
    versions: Selector,
    nav_link: Selector,
}

impl PageExtractor {
    pub fn new(layout: &SiteLayout) -> Result<Self, LoadError> {
        Ok(Self {
            entry: compile("entry", &layout.entry)?,
            title: compile("title", &layout.title)?,
            snippet: compile("snippet", &layout.snippet)?,
            versions: compile("versions", &layout.versions)?,
            nav_link: compile("nav_link", &layout.nav_link)?,
        })
    }

    /// Index every entry and NavLink on the page.
    ///
    /// Malformed entries are skipped or filled with empty text; one bad entry never
    /// prevents the rest of the page from being indexed.
    pub fn extract(&self, source: &str, html: &str) -> Catalog {
        let document = Html::parse_document(html);

        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for element in document.select(&self.entry) {
            let Some(id) = element.value().id() else {
                tracing::warn!("Skipping entry without an id in {}", source);
                continue;
            };
            if !seen.insert(id.to_string()) {
                tracing::warn!("Skipping duplicate entry '{}' in {}", id, source);
                continue;
            }
            entries.push(self.extract_entry(id, element));
        }

        let mut nav_links: Vec<NavLink> = Vec::new();
        for anchor in document.select(&self.nav_link) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let Some(target) = href.strip_prefix('#').filter(|t| !t.is_empty()) else {
                continue;
            };
            // The first anchor for an id is the one that gets toggled
            if nav_links.iter().any(|link| link.target == target) {
                continue;
            }
            nav_links.push(NavLink {
                href: href.to_string(),
                target: target.to_string(),
            });
        }

        for entry in &entries {
            if !nav_links.iter().any(|link| link.target == entry.id) {
                tracing::debug!("Entry '{}' in {} has no NavLink", entry.id, source);
            }
        }

        tracing::debug!(
            "Indexed {} entries and {} nav links from {}",
            entries.len(),
            nav_links.len(),
            source
        );

        Catalog::new(source, entries, nav_links)
    }

    fn extract_entry(&self, id: &str, element: ElementRef<'_>) -> Entry {
        let name = element
            .select(&self.title)
            .next()
            .map(text_content)
            .unwrap_or_else(|| {
                tracing::debug!("Entry '{}' has no title", id);
                String::new()
            });

        let versions = element
            .select(&self.versions)
            .next()
            .map(text_content)
            .unwrap_or_else(|| {
                tracing::debug!("Entry '{}' has no versions cell", id);
                String::new()
            });

        let snippets = element.select(&self.snippet).map(text_content).collect();

        Entry {
            id: id.to_string(),
            name,
            snippets,
            versions,
        }
    }
}

fn compile(field: &'static str, selector: &str) -> Result<Selector, LoadError> {
    Selector::parse(selector).map_err(|e| LoadError::InvalidSelector {
        field,
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Equivalent of the DOM `textContent`.
fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect()
}
