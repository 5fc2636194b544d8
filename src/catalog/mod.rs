//! The entry index: every documented item of a page, extracted once at load time.
//!
//! Filtering runs against this in-memory model rather than against the page itself;
//! [`crate::render`] writes the results back.

mod entry;
mod extract;
mod site;

pub use entry::{Catalog, Entry, NavLink};
pub use extract::PageExtractor;
pub use site::{find_pages, load_site};
