//! Search bar query parsing.
//!
//! A query is free text with at most one embedded version filter of the form
//! `v:MAJOR.MINOR[.PATCH][+]` (or `version:`), case-insensitive. The filter token is
//! cut out of the text before the text is used for matching.

use regex::Regex;
use std::sync::LazyLock;

/// Captures the version and the optional `+` of a filter token.
static VERSION_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)v(?:ersion)?:(\d\.\d(?:\.\d)?)(\+)?").expect("version token pattern is valid")
});

/// A filter token together with one leading space, as removed from the text.
static VERSION_TOKEN_WITH_SPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i) ?v(?:ersion)?:\d\.\d(?:\.\d)?\+?").expect("version token pattern is valid")
});

static REPEATED_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("space pattern is valid"));

/// Version constraint extracted from a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionFilter {
    /// The version as typed, e.g. `2.5` or `2.5.1`.
    pub version: String,
    /// `+` modifier: this version or any newer one.
    pub and_up: bool,
}

/// A parsed search bar query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    term: String,
    version: Option<VersionFilter>,
}

impl SearchQuery {
    /// Parse raw search bar input.
    ///
    /// Only the first version token is honored, but every token is removed from the
    /// text term.
    pub fn parse(raw: &str) -> Self {
        let version = VERSION_TOKEN.captures(raw).map(|caps| VersionFilter {
            version: caps[1].to_string(),
            and_up: caps.get(2).is_some(),
        });

        let without_tokens = VERSION_TOKEN_WITH_SPACE.replace_all(raw, "");
        let collapsed = REPEATED_SPACES.replace_all(&without_tokens, " ");
        let term = sanitize_term(&collapsed);

        Self { term, version }
    }

    /// The sanitized text term. May be empty.
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn version(&self) -> Option<&VersionFilter> {
        self.version.as_ref()
    }

    pub fn matcher(&self) -> TermMatcher<'_> {
        TermMatcher::new(&self.term)
    }
}

/// Drop everything outside `[a-zA-Z0-9 ]`.
///
/// Whatever survives is safe to embed in a pattern verbatim. Punctuation in entry
/// names therefore can never be searched for.
pub fn sanitize_term(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

/// Case-insensitive substring test for a sanitized term.
#[derive(Debug, Clone, Copy)]
pub struct TermMatcher<'a> {
    needle: &'a [u8],
}

impl<'a> TermMatcher<'a> {
    pub fn new(term: &'a str) -> Self {
        Self {
            needle: term.as_bytes(),
        }
    }

    /// Whether the empty term is in use, which matches everything.
    pub const fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// ASCII case folding only: the term never contains anything else.
    pub fn is_match(&self, haystack: &str) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        haystack
            .as_bytes()
            .windows(self.needle.len())
            .any(|window| window.eq_ignore_ascii_case(self.needle))
    }
}
