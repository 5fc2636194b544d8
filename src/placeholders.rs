//! Expansion of `${latest-version}` and `${contributors-size}` in page text.
//!
//! Values come from the repository's release listing. Expansion is best-effort: a
//! failed request is logged and the placeholder stays as written.

use crate::config::PlaceholderSettings;
use crate::error::PlaceholderError;
use anyhow::Context;
use serde::Deserialize;
use std::future::Future;

pub const LATEST_VERSION: &str = "${latest-version}";
pub const CONTRIBUTORS_SIZE: &str = "${contributors-size}";

/// Where placeholder values come from.
pub trait ReleaseSource {
    /// Tag name of the newest release.
    fn latest_release(&self) -> impl Future<Output = Result<String, PlaceholderError>> + Send;

    fn contributor_count(&self) -> impl Future<Output = Result<usize, PlaceholderError>> + Send;
}

/// Release listing served by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubReleases {
    client: reqwest::Client,
    api_base: String,
    repository: String,
    contributors_per_page: u32,
}

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

impl GithubReleases {
    pub fn new(settings: &PlaceholderSettings) -> crate::error::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            repository: settings.repository.clone(),
            contributors_per_page: settings.contributors_per_page,
        })
    }

    fn url(&self, listing: &str, per_page: u32) -> String {
        format!(
            "{}/repos/{}/{}?per_page={}",
            self.api_base, self.repository, listing, per_page
        )
    }
}

impl ReleaseSource for GithubReleases {
    async fn latest_release(&self) -> Result<String, PlaceholderError> {
        let releases: Vec<Release> = self
            .client
            .get(self.url("releases", 1))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        releases
            .into_iter()
            .next()
            .map(|release| release.tag_name)
            .ok_or_else(|| PlaceholderError::NoReleases {
                repository: self.repository.clone(),
            })
    }

    async fn contributor_count(&self) -> Result<usize, PlaceholderError> {
        let contributors: Vec<serde_json::Value> = self
            .client
            .get(self.url("contributors", self.contributors_per_page))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(contributors.len())
    }
}

/// Replace every known placeholder in `text`.
///
/// Only the values whose placeholder occurs are requested; both requests run
/// concurrently. Never fails.
pub async fn expand<S: ReleaseSource>(text: &str, source: &S) -> String {
    let wants_version = text.contains(LATEST_VERSION);
    let wants_contributors = text.contains(CONTRIBUTORS_SIZE);

    let version = async {
        if wants_version {
            Some(source.latest_release().await)
        } else {
            None
        }
    };
    let contributors = async {
        if wants_contributors {
            Some(source.contributor_count().await)
        } else {
            None
        }
    };
    let (version, contributors) = futures::join!(version, contributors);

    let mut expanded = text.to_string();
    match version {
        Some(Ok(tag)) => expanded = expanded.replace(LATEST_VERSION, &tag),
        Some(Err(e)) => tracing::warn!("Leaving {} unexpanded: {}", LATEST_VERSION, e),
        None => {}
    }
    match contributors {
        Some(Ok(count)) => expanded = expanded.replace(CONTRIBUTORS_SIZE, &count.to_string()),
        Some(Err(e)) => tracing::warn!("Leaving {} unexpanded: {}", CONTRIBUTORS_SIZE, e),
        None => {}
    }
    expanded
}
