//! Shared test fixtures and utilities for integration tests.
//!
//! # Test Isolation Strategy
//!
//! Each test gets its own temporary site directory with freshly written pages and its
//! own `SiteState` (empty page cache, no open page).
//!
//! # Available Fixtures
//!
//! - `site`: a temp directory holding `effects.html` and `conditions.html`
//! - `open_site`: the same site with `effects.html` already opened for searching

use docsite_filter::{Config, SiteState};
use rstest::fixture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// One documented entry for [`render_page`].
pub struct PageEntry<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub patterns: &'a [&'a str],
    pub since: &'a str,
    /// Whether the sidebar lists the entry.
    pub linked: bool,
}

/// Render a page with the same markup as the generated documentation.
pub fn render_page(entries: &[PageEntry<'_>]) -> String {
    let mut nav = String::new();
    let mut content = String::new();

    for entry in entries {
        if entry.linked {
            nav.push_str(&format!(
                "<a href=\"#{id}\">{name}</a>\n",
                id = entry.id,
                name = entry.name
            ));
        }
        let patterns: String = entry
            .patterns
            .iter()
            .map(|p| format!("<div class=\"skript-code-block\">{}</div>", p))
            .collect();
        content.push_str(&format!(
            r##"<div class="item-wrapper" id="{id}">
  <div class="item-title"><h1>{name}</h1><a href="#{id}">#</a></div>
  <table class="item-details"><tr><td>Since:</td><td>{since}</td></tr></table>
  <table class="item-details"><tr><td>Patterns:</td><td>{patterns}</td></tr></table>
</div>
"##,
            id = entry.id,
            name = entry.name,
            since = entry.since,
            patterns = patterns
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html><head><title>Docs</title></head><body>
<div id="global-navigation"><a href="index.html">Home</a><a href="effects.html">Effects</a></div>
<div id="side-nav"><div id="nav-contents">
{nav}</div></div>
<div id="content">
{content}</div>
</body></html>
"#
    )
}

pub fn effects_page() -> String {
    render_page(&[
        PageEntry {
            id: "EffBroadcast",
            name: "Broadcast",
            patterns: &["broadcast %objects% [(to|in) %worlds%]"],
            since: "1.0",
            linked: true,
        },
        PageEntry {
            id: "EffSendTitle",
            name: "Send Title",
            patterns: &[
                "send title %text% [with subtitle %text%] [to %players%]",
                "send subtitle %text% [to %players%]",
            ],
            since: "2.3",
            linked: true,
        },
        PageEntry {
            id: "EffGlow",
            name: "Glow",
            patterns: &["make %entities% glow"],
            since: "2.5.1+, 2.7 (blocks)",
            linked: true,
        },
        PageEntry {
            id: "EffUnlisted",
            name: "Unlisted Effect",
            patterns: &["do the unlisted thing"],
            since: "2.2-dev36",
            linked: false,
        },
    ])
}

pub fn conditions_page() -> String {
    render_page(&[PageEntry {
        id: "CondIsAlive",
        name: "Is Alive",
        patterns: &["%entities% (is|are) (alive|dead)"],
        since: "2.0",
        linked: true,
    }])
}

/// A temporary documentation site directory.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempSite {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempSite {
    /// Creates a new empty temporary site.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn page(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Writes a file, creating parent directories as needed.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }
}

impl Default for TempSite {
    fn default() -> Self {
        Self::new()
    }
}

/// Config for tests: short settle delay, no network.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.search.settle_delay_ms = 10;
    config.placeholders.enabled = false;
    config
}

/// A site with its own state, nothing opened yet.
#[allow(dead_code)] // Fields used across different integration test crates
pub struct IsolatedSite {
    pub site: TempSite,
    pub state: Arc<SiteState>,
}

#[fixture]
pub fn site() -> IsolatedSite {
    let site = TempSite::new();
    site.create_file("effects.html", &effects_page());
    site.create_file("conditions.html", &conditions_page());
    site.create_file("assets/style.css", "body {}");

    let state = Arc::new(SiteState::new(test_config()).expect("Failed to create state"));
    IsolatedSite { site, state }
}

#[fixture]
pub async fn open_site(site: IsolatedSite) -> IsolatedSite {
    site.state
        .open_page(&site.site.page("effects.html"))
        .await
        .expect("Failed to open effects.html");
    site
}
