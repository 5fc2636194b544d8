pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod navigation;
pub mod placeholders;
pub mod query;
pub mod render;
pub mod scheduler;
pub mod server;
pub mod state;
pub mod tracing;
pub mod version;

pub use catalog::{Catalog, Entry, NavLink, PageExtractor};
pub use config::{Config, SiteLayout};
pub use filter::{FilterOutcome, Verdict, evaluate};
pub use query::{SearchQuery, VersionFilter};
pub use render::{PageState, PageView, apply};
pub use scheduler::{RunStatus, SearchScheduler};
pub use server::FilterServer;
pub use state::{SearchReport, SiteState};
