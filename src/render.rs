//! Writing filter results back onto a page.

use crate::catalog::Catalog;
use crate::filter::FilterOutcome;
use std::collections::HashMap;

/// Text of the indicator shown when nothing matches.
pub const NO_MATCHES_TEXT: &str = "No matches found.";

/// The mutable surface of a documentation page.
pub trait PageView {
    fn set_entry_visible(&mut self, id: &str, visible: bool);

    /// Returns false when the entry has no NavLink.
    fn set_nav_link_visible(&mut self, id: &str, visible: bool) -> bool;

    fn has_no_matches_indicator(&self) -> bool;

    fn insert_no_matches_indicator(&mut self);

    fn remove_no_matches_indicator(&mut self);
}

/// Push an outcome onto a page.
///
/// Entry and NavLink visibility are always written together. The "no matches"
/// indicator is inserted or removed only when its presence needs to change, so the
/// page never holds more than one.
pub fn apply<V: PageView + ?Sized>(view: &mut V, outcome: &FilterOutcome) {
    for verdict in &outcome.verdicts {
        view.set_entry_visible(&verdict.id, verdict.visible);
        if !view.set_nav_link_visible(&verdict.id, verdict.visible) {
            tracing::trace!("No NavLink for entry '{}'", verdict.id);
        }
    }

    if outcome.is_empty() {
        if !view.has_no_matches_indicator() {
            view.insert_no_matches_indicator();
        }
    } else if view.has_no_matches_indicator() {
        view.remove_no_matches_indicator();
    }
}

/// In-memory model of a page's visibility state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    /// Entry ids in document order.
    order: Vec<String>,
    entries: HashMap<String, bool>,
    nav_links: HashMap<String, bool>,
    indicators: usize,
}

impl PageState {
    /// Every entry and NavLink starts visible, with no indicator.
    pub fn new(catalog: &Catalog) -> Self {
        let order: Vec<String> = catalog.entries().iter().map(|e| e.id.clone()).collect();
        let entries = order.iter().map(|id| (id.clone(), true)).collect();
        let nav_links = order
            .iter()
            .filter(|id| catalog.nav_link(id).is_some())
            .map(|id| (id.clone(), true))
            .collect();
        Self {
            order,
            entries,
            nav_links,
            indicators: 0,
        }
    }

    pub fn is_entry_visible(&self, id: &str) -> Option<bool> {
        self.entries.get(id).copied()
    }

    pub fn is_nav_link_visible(&self, id: &str) -> Option<bool> {
        self.nav_links.get(id).copied()
    }

    /// Visible entry ids in document order.
    pub fn visible_entries(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter(|id| self.entries.get(id.as_str()).copied().unwrap_or(false))
            .map(String::as_str)
            .collect()
    }

    /// Number of "no matches" indicators on the page.
    pub const fn indicator_count(&self) -> usize {
        self.indicators
    }
}

impl PageView for PageState {
    fn set_entry_visible(&mut self, id: &str, visible: bool) {
        if let Some(state) = self.entries.get_mut(id) {
            *state = visible;
        }
    }

    fn set_nav_link_visible(&mut self, id: &str, visible: bool) -> bool {
        match self.nav_links.get_mut(id) {
            Some(state) => {
                *state = visible;
                true
            }
            None => false,
        }
    }

    fn has_no_matches_indicator(&self) -> bool {
        self.indicators > 0
    }

    fn insert_no_matches_indicator(&mut self) {
        self.indicators += 1;
    }

    fn remove_no_matches_indicator(&mut self) {
        self.indicators = self.indicators.saturating_sub(1);
    }
}
