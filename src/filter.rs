//! Deciding which entries match a search query.
//!
//! An entry matches when its name or any of its snippets contains the text term and
//! it is eligible for the requested version. Version eligibility is:
//!
//! - no version filter: always eligible
//! - `v:X.Y`: the raw versions cell contains `X.Y` as a substring
//! - `v:X.Y+`: the substring test, or any comma-separated recorded version that
//!   compares newer than `X.Y` (see [`crate::version`])
//!
//! Evaluation is pure; [`crate::render::apply`] pushes the outcome onto a page.

use crate::catalog::{Catalog, Entry};
use crate::query::{SearchQuery, TermMatcher, VersionFilter};
use crate::version;

/// Visibility decided for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub id: String,
    pub visible: bool,
}

/// Visibility of every entry of a catalog, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub verdicts: Vec<Verdict>,
}

impl FilterOutcome {
    pub fn matched(&self) -> usize {
        self.verdicts.iter().filter(|v| v.visible).count()
    }

    /// True when the "no matches" indicator should be shown.
    pub fn is_empty(&self) -> bool {
        self.matched() == 0
    }

    pub fn visible_ids(&self) -> impl Iterator<Item = &str> {
        self.verdicts
            .iter()
            .filter(|v| v.visible)
            .map(|v| v.id.as_str())
    }
}

/// Recompute visibility for every entry of the catalog.
pub fn evaluate(catalog: &Catalog, query: &SearchQuery) -> FilterOutcome {
    let matcher = query.matcher();
    let verdicts = catalog
        .entries()
        .iter()
        .map(|entry| Verdict {
            id: entry.id.clone(),
            visible: matches_entry(entry, &matcher, query.version()),
        })
        .collect::<Vec<_>>();

    let outcome = FilterOutcome { verdicts };
    tracing::debug!(
        "Query {:?} matched {}/{} entries in {}",
        query.term(),
        outcome.matched(),
        catalog.len(),
        catalog.source()
    );
    outcome
}

/// Whether a single entry satisfies both the text term and the version filter.
pub fn matches_entry(
    entry: &Entry,
    matcher: &TermMatcher<'_>,
    filter: Option<&VersionFilter>,
) -> bool {
    let eligible = filter.is_none_or(|filter| version_eligible(entry, filter));
    eligible && text_matches(entry, matcher)
}

fn text_matches(entry: &Entry, matcher: &TermMatcher<'_>) -> bool {
    matcher.is_empty()
        || matcher.is_match(&entry.name)
        || entry.snippets.iter().any(|snippet| matcher.is_match(snippet))
}

/// Substring match OR, under `+`, any recorded version newer than the requested one.
pub fn version_eligible(entry: &Entry, filter: &VersionFilter) -> bool {
    if entry.versions.contains(&filter.version) {
        return true;
    }
    filter.and_up
        && entry
            .recorded_versions()
            .any(|recorded| version::is_newer(&filter.version, recorded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NavLink;
    use assert2::check;
    use rstest::{fixture, rstest};

    fn entry(id: &str, name: &str, snippets: &[&str], versions: &str) -> Entry {
        Entry {
            id: id.to_string(),
            name: name.to_string(),
            snippets: snippets.iter().map(ToString::to_string).collect(),
            versions: versions.to_string(),
        }
    }

    #[fixture]
    fn catalog() -> Catalog {
        let entries = vec![
            entry("EffFoo", "Foo Effect", &["foo %objects%"], "1.0"),
            entry("EffBar", "Bar", &["bar %number%", "baz %number%"], "2.5.1+"),
            entry("CondQux", "Qux", &["qux"], "2.2-dev36, 2.7"),
            entry("ExprFooBar", "Food Bar", &[], "2.4"),
            entry("EvtBroken", "Broken", &["broken"], ""),
        ];
        let nav_links = entries
            .iter()
            .map(|e| NavLink {
                href: format!("#{}", e.id),
                target: e.id.clone(),
            })
            .collect();
        Catalog::new("fixture", entries, nav_links)
    }

    fn visible(catalog: &Catalog, raw: &str) -> Vec<String> {
        evaluate(catalog, &SearchQuery::parse(raw))
            .visible_ids()
            .map(ToString::to_string)
            .collect()
    }

    #[rstest]
    fn test_empty_query_matches_everything(catalog: Catalog) {
        let outcome = evaluate(&catalog, &SearchQuery::parse(""));
        check!(outcome.matched() == catalog.len());
        check!(!outcome.is_empty());
    }

    #[rstest]
    #[case("foo", &["EffFoo", "ExprFooBar"])]
    #[case("FOO", &["EffFoo", "ExprFooBar"])]
    #[case("baz", &["EffBar"])] // Second snippet
    #[case("objects", &["EffFoo"])]
    #[case("food bar", &["ExprFooBar"])]
    #[case("nothing here", &[])]
    fn test_text_term(catalog: Catalog, #[case] raw: &str, #[case] expected: &[&str]) {
        check!(visible(&catalog, raw) == expected);
    }

    #[rstest]
    #[case("v:1.0", &["EffFoo"])]
    #[case("v:2.5", &["EffBar"])] // Substring of "2.5.1+"
    #[case("v:2.5.1", &["EffBar"])]
    #[case("v:2.2", &["CondQux"])]
    #[case("v:3.0", &[])]
    fn test_exact_version(catalog: Catalog, #[case] raw: &str, #[case] expected: &[&str]) {
        check!(visible(&catalog, raw) == expected);
    }

    #[rstest]
    #[case("v:1.0+", &["EffFoo", "EffBar", "CondQux", "ExprFooBar"])]
    #[case("v:2.5+", &["EffBar", "CondQux"])]
    #[case("v:2.6+", &["CondQux"])] // 2.7 is newer
    #[case("v:2.7+", &["CondQux"])] // Substring still counts without a newer version
    #[case("v:2.8+", &[])]
    fn test_version_and_up(catalog: Catalog, #[case] raw: &str, #[case] expected: &[&str]) {
        check!(visible(&catalog, raw) == expected);
    }

    #[rstest]
    #[case("foo v:1.0+", &["EffFoo", "ExprFooBar"])]
    #[case("foo v:2.0+", &["ExprFooBar"])]
    #[case("bar v:2.5", &["EffBar"])]
    #[case("qux v:1.0", &[])]
    fn test_combined(catalog: Catalog, #[case] raw: &str, #[case] expected: &[&str]) {
        check!(visible(&catalog, raw) == expected);
    }

    #[test]
    fn test_plus_requires_newer_not_equal() {
        let e = entry("A", "A", &[], "2.5.1");
        let filter = VersionFilter {
            version: "2.5.1".to_string(),
            and_up: true,
        };
        // Equal only passes through the substring test
        check!(version_eligible(&e, &filter));

        let e = entry("B", "B", &[], "2.5.0");
        check!(!version_eligible(&e, &filter));
    }

    #[test]
    fn test_patch_base_reaches_next_minor() {
        // 2.6 scales to 260, above 2.5.1 at 251
        let e = entry("A", "A", &[], "2.6");
        let and_up = VersionFilter {
            version: "2.5.1".to_string(),
            and_up: true,
        };
        check!(version_eligible(&e, &and_up));

        let exact = VersionFilter {
            and_up: false,
            ..and_up
        };
        check!(!version_eligible(&e, &exact));
    }

    #[rstest]
    fn test_entry_with_empty_versions_never_version_eligible(catalog: Catalog) {
        check!(!visible(&catalog, "v:1.0+").contains(&"EvtBroken".to_string()));
        check!(visible(&catalog, "broken") == ["EvtBroken"]);
    }

    #[rstest]
    fn test_evaluation_is_idempotent(catalog: Catalog) {
        let query = SearchQuery::parse("bar v:2.0+");
        check!(evaluate(&catalog, &query) == evaluate(&catalog, &query));
    }

    #[rstest]
    fn test_verdicts_follow_document_order(catalog: Catalog) {
        let outcome = evaluate(&catalog, &SearchQuery::parse("zzz"));
        let ids: Vec<_> = outcome.verdicts.iter().map(|v| v.id.as_str()).collect();
        check!(ids == ["EffFoo", "EffBar", "CondQux", "ExprFooBar", "EvtBroken"]);
        check!(outcome.is_empty());
    }
}
