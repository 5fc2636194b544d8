//! Page location bookkeeping: scroll-synced anchors, the active navigation tab and
//! copyable entry links.

use crate::catalog::Catalog;
use regex::Regex;
use std::sync::LazyLock;

/// Entry tops inside this band (in pixels from the content top) count as "on screen".
pub const ACTIVE_BAND: (f64, f64) = (0.0, 150.0);

/// Home page tab href.
pub const HOME_PAGE: &str = "index.html";

static PAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(.*)/(.+?).html(.*)").expect("page name pattern is valid")
});

static PAGE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(.+?.html)(.*)").expect("page link pattern is valid"));

/// `location` with its fragment replaced by `#id`.
pub fn anchor_url(location: &str, id: &str) -> String {
    let base = location.split('#').next().unwrap_or_default();
    format!("{}#{}", base, id)
}

/// Href of the global navigation tab for the page at `location`.
///
/// Locations without a `<name>.html` segment are the home page.
pub fn active_tab(location: &str) -> String {
    let page = PAGE_NAME.replace_all(location, "${2}");
    if page.is_empty() || page == location {
        HOME_PAGE.to_string()
    } else {
        format!("{}.html", page)
    }
}

/// `location` cut right after the first `.html`, dropping fragment and query.
pub fn page_link(location: &str) -> String {
    PAGE_LINK.replace_all(location, "${1}").into_owned()
}

/// What a scroll event changes on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollUpdate {
    /// New location to put in history (replace, not push).
    pub location: String,
    /// Entry now considered on screen.
    pub entry: String,
    /// NavLink to highlight, when the entry has one.
    pub activate: Option<String>,
    /// NavLink to un-highlight.
    pub deactivate: Option<String>,
}

/// Tracks which NavLink is highlighted while the content scrolls.
#[derive(Debug, Default)]
pub struct ScrollTracker {
    active: Option<String>,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently highlighted NavLink target.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Handle a scroll event.
    ///
    /// `positions` are `(entry id, top)` pairs in document order. When several entries
    /// sit inside [`ACTIVE_BAND`], the last one wins. Returns `None` when no entry is
    /// inside the band, in which case nothing changes.
    pub fn observe<'a>(
        &mut self,
        catalog: &Catalog,
        positions: impl IntoIterator<Item = (&'a str, f64)>,
        location: &str,
    ) -> Option<ScrollUpdate> {
        let (low, high) = ACTIVE_BAND;
        let entry = positions
            .into_iter()
            .filter(|(_, top)| *top > low && *top < high)
            .map(|(id, _)| id)
            .last()?;

        let activate = catalog.nav_link(entry).map(|link| link.target.clone());
        let deactivate = std::mem::replace(&mut self.active, activate.clone());

        Some(ScrollUpdate {
            location: anchor_url(location, entry),
            entry: entry.to_string(),
            activate,
            deactivate,
        })
    }
}
