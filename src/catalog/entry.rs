use std::collections::HashMap;

/// One documented item on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Unique element id, also the anchor its NavLink points at.
    pub id: String,
    /// Display name (title text).
    pub name: String,
    /// Text of each code snippet, in document order.
    pub snippets: Vec<String>,
    /// Raw text of the supported-versions cell, e.g. `2.2, 2.5.1+`. Empty when absent.
    pub versions: String,
}

impl Entry {
    /// The comma-separated recorded versions, untrimmed.
    pub fn recorded_versions(&self) -> impl Iterator<Item = &str> {
        self.versions.split(',')
    }
}

/// A sidebar anchor tied to one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// The href as written, `#<id>`.
    pub href: String,
    /// Id of the entry the link points at.
    pub target: String,
}

/// All entries of one page, indexed once when the page is loaded.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    source: String,
    entries: Vec<Entry>,
    nav_links: HashMap<String, NavLink>,
}

impl Catalog {
    pub fn new(source: impl Into<String>, entries: Vec<Entry>, nav_links: Vec<NavLink>) -> Self {
        let nav_links = nav_links
            .into_iter()
            .map(|link| (link.target.clone(), link))
            .collect();
        Self {
            source: source.into(),
            entries,
            nav_links,
        }
    }

    /// Where the page came from (path or label).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Entries in document order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn nav_link(&self, id: &str) -> Option<&NavLink> {
        self.nav_links.get(id)
    }

    pub fn nav_link_count(&self) -> usize {
        self.nav_links.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
