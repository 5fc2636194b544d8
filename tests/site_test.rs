mod common;

use assert2::{check, let_assert};
use common::{IsolatedSite, effects_page, site};
use docsite_filter::catalog::{find_pages, load_site};
use docsite_filter::error::LoadError;
use docsite_filter::{PageExtractor, SiteLayout};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
fn find_pages_lists_html_only(site: IsolatedSite) {
    let_assert!(Ok(pages) = find_pages(site.site.path()));
    let names: Vec<_> = pages
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    check!(names == ["conditions.html", "effects.html"]);
}

#[rstest]
fn load_site_indexes_every_page(site: IsolatedSite) {
    let extractor = PageExtractor::new(&SiteLayout::default()).expect("default layout is valid");
    let_assert!(Ok(catalogs) = load_site(site.site.path(), &extractor));

    check!(catalogs.len() == 2);
    check!(catalogs[0].source() == "conditions.html");
    check!(catalogs[1].source() == "effects.html");
    check!(catalogs[1].len() == 4);
    check!(catalogs[1].nav_link_count() == 3);
}

#[test]
fn load_site_missing_root_fails() {
    let extractor = PageExtractor::new(&SiteLayout::default()).expect("default layout is valid");
    let_assert!(Err(error) = load_site(std::path::Path::new("/nonexistent/docs"), &extractor));
    check!(matches!(
        error.downcast_ref::<LoadError>(),
        Some(LoadError::NotFound { .. })
    ));
}

#[rstest]
#[tokio::test]
async fn unchanged_page_is_served_from_cache(site: IsolatedSite) {
    let path = site.site.page("effects.html");
    let_assert!(Ok(first) = site.state.catalog(&path).await);
    let_assert!(Ok(second) = site.state.catalog(&path).await);
    check!(Arc::ptr_eq(&first, &second));
}

#[rstest]
#[tokio::test]
async fn edited_page_is_reindexed(site: IsolatedSite) {
    let path = site.site.page("effects.html");
    let_assert!(Ok(first) = site.state.catalog(&path).await);
    check!(first.len() == 4);

    let edited = effects_page().replace("EffGlow", "EffShine");
    site.site.create_file("effects.html", &edited);

    let_assert!(Ok(second) = site.state.catalog(&path).await);
    check!(!Arc::ptr_eq(&first, &second));
    check!(second.entry("EffShine").is_some());
    check!(second.entry("EffGlow").is_none());
}

#[rstest]
#[tokio::test]
async fn missing_page_reports_not_found(site: IsolatedSite) {
    let_assert!(Err(error) = site.state.catalog(&site.site.page("missing.html")).await);
    check!(matches!(
        error.downcast_ref::<LoadError>(),
        Some(LoadError::NotFound { .. })
    ));
}
