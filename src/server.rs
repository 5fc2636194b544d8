//! MCP server exposing the documentation search filter.

use crate::navigation::{active_tab, anchor_url, page_link};
use crate::scheduler::RunStatus;
use crate::state::{SearchReport, SiteState};
use crate::version::{Comparison, compare};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars, tool, tool_handler, tool_router,
};
use std::borrow::Cow;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

/// Parameters for load_page tool
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct LoadPageRequest {
    /// Path to a generated documentation page (.html)
    pub path: String,
}

/// Parameters for search tool
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Search bar contents, optionally with a version filter like `v:2.5` or `v:2.5.1+`
    pub query: String,
}

/// Parameters for compare_versions tool
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CompareVersionsRequest {
    /// Requested version, e.g. `2.5`
    pub base: String,
    /// Recorded version, e.g. `2.5.1+`
    pub target: String,
}

/// Parameters for anchor_link tool
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnchorLinkRequest {
    /// Current page location
    pub location: String,
    /// Entry id to link to
    pub id: String,
}

/// Parameters for expand_placeholders tool
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ExpandPlaceholdersRequest {
    /// Text containing `${latest-version}` or `${contributors-size}`
    pub text: String,
}

/// MCP Server for documentation site search
#[derive(Clone)]
pub struct FilterServer {
    /// Shared page cache and open page
    state: Arc<SiteState>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for FilterServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl FilterServer {
    pub fn new(state: Arc<SiteState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    pub fn state(&self) -> &Arc<SiteState> {
        &self.state
    }

    #[tool(
        description = "Open a generated documentation page for searching. Indexes every entry (name, code patterns, supported versions) and its sidebar link. All entries start visible."
    )]
    async fn load_page(
        &self,
        Parameters(LoadPageRequest { path }): Parameters<LoadPageRequest>,
    ) -> std::result::Result<String, String> {
        let path = PathBuf::from(&*expand_tilde(&path));
        let catalog = self
            .state
            .open_page(&path)
            .await
            .map_err(|e| format!("Failed to load page: {:#}", e))?;

        Ok(format!(
            "Loaded {} ({} entries, {} sidebar links)",
            catalog.source(),
            catalog.len(),
            catalog.nav_link_count()
        ))
    }

    #[tool(
        description = "Filter the open page like its search bar does. Free text matches entry names and code patterns case-insensitively; `v:X.Y[.Z]` keeps entries whose supported versions mention that version, `v:X.Y[.Z]+` also keeps newer ones."
    )]
    async fn search(
        &self,
        Parameters(SearchRequest { query }): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        let report = self
            .state
            .search(&query)
            .await
            .map_err(|e| format!("{:#}", e))?;
        Ok(format_report(&query, &report))
    }

    #[tool(
        description = "Compare two version strings the way the search filter does. Returns 1 if target is newer than base, 0 if equal, -1 if older."
    )]
    fn compare_versions(
        &self,
        Parameters(CompareVersionsRequest { base, target }): Parameters<CompareVersionsRequest>,
    ) -> std::result::Result<String, String> {
        Ok(Comparison::from(compare(&base, &target)).to_string())
    }

    #[tool(
        description = "Build the shareable link for an entry, plus the page link and the navigation tab that is active for the location."
    )]
    fn anchor_link(
        &self,
        Parameters(AnchorLinkRequest { location, id }): Parameters<AnchorLinkRequest>,
    ) -> std::result::Result<String, String> {
        Ok(format!(
            "link: {}\npage: {}\ntab: {}",
            anchor_url(&location, &id),
            page_link(&location),
            active_tab(&location)
        ))
    }

    #[tool(
        description = "Replace ${latest-version} and ${contributors-size} with values from the release listing. Placeholders that cannot be resolved are left as-is."
    )]
    async fn expand_placeholders(
        &self,
        Parameters(ExpandPlaceholdersRequest { text }): Parameters<ExpandPlaceholdersRequest>,
    ) -> std::result::Result<String, String> {
        Ok(self.state.expand_placeholders(&text).await)
    }
}

#[tool_handler]
impl ServerHandler for FilterServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "docsite-filter: searches generated documentation pages the way their search bar does. \
                 Use load_page to open a page, then search with free text and optional v:X.Y[+] filters.",
            )
    }
}

/// Render a search report for display.
pub fn format_report(query: &str, report: &SearchReport) -> String {
    let mut out = String::new();
    match report.status {
        RunStatus::Applied { matched, total } => {
            let _ = writeln!(out, "Query {:?}: {} of {} entries visible", query, matched, total);
        }
        RunStatus::Superseded => {
            let _ = writeln!(out, "Query {:?} was superseded by a newer query", query);
        }
    }

    if report.no_matches {
        out.push_str(crate::render::NO_MATCHES_TEXT);
        out.push('\n');
    }
    for (id, name) in &report.visible {
        let _ = writeln!(out, "• {} (#{})", name, id);
    }
    out
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
