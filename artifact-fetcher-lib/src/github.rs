use crate::config::{Config, Credential};
use crate::error::FeedIssue;
use crate::logging::{progress_bar_style, spinner_style};
use crate::release_client::ReleaseClient;
use anyhow::{Context, Result, bail};
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::instrument;
use tracing_indicatif::span_ext::IndicatifSpanExt;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const GITHUB_API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const GITHUB_API_VERSION: &str = "2022-11-28";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub tag_name: Option<String>,
    pub draft: Option<bool>,
    pub prerelease: Option<bool>,
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub name: Option<String>,
    pub browser_download_url: String,
    pub size: Option<u64>,
}

/// Matches the GitHub API JSON response for a single release.
/// Absent and `null` fields both decode to `None`.
#[derive(Debug, Deserialize)]
struct ReleaseJson {
    tag_name: Option<String>,
    draft: Option<bool>,
    prerelease: Option<bool>,
    assets: Option<Vec<Value>>,
}

/// Matches the GitHub API JSON response for a single release asset
#[derive(Debug, Deserialize)]
struct AssetJson {
    name: Option<String>,
    browser_download_url: Option<String>,
    size: Option<u64>,
}

/// Outcome of decoding the release listing body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseFeed {
    Listed(Vec<Release>),
    Issue(FeedIssue),
}

impl Release {
    /// Drafts and prereleases are never treated as published. An absent flag counts as unset.
    pub fn is_published(&self) -> bool {
        fn is_set(flag: Option<bool>) -> bool {
            match flag {
                Some(true) => true,
                Some(false) | None => false,
            }
        }

        !is_set(self.draft) && !is_set(self.prerelease)
    }

    fn from_json_struct(json: ReleaseJson) -> Self {
        let assets = json
            .assets
            .unwrap_or_default()
            .into_iter()
            .filter_map(Asset::from_json_value)
            .collect();
        Release {
            tag_name: json.tag_name,
            draft: json.draft,
            prerelease: json.prerelease,
            assets,
        }
    }
}

impl Asset {
    /// Label used in log and progress messages.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.browser_download_url)
    }

    fn from_json_value(value: Value) -> Option<Self> {
        if !value.is_object() {
            tracing::debug!("Skipping asset that is not a JSON object: {}", value);
            return None;
        }

        let json: AssetJson = match serde_json::from_value(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::debug!("Skipping malformed asset entry: {}", e);
                return None;
            }
        };

        let browser_download_url = json
            .browser_download_url
            .filter(|url| !url.is_empty())?;
        Some(Asset {
            name: json.name,
            browser_download_url,
            size: json.size,
        })
    }
}

/// Decodes the body of the release listing endpoint.
///
/// Invalid JSON and JSON that is not an array are reported as a [`FeedIssue`]
/// instead of an error. Array entries that are not release objects are skipped.
pub fn decode_releases(body: &str) -> ReleaseFeed {
    let data: Value = match serde_json::from_str(body) {
        Ok(data) => data,
        Err(e) => return ReleaseFeed::Issue(FeedIssue::InvalidJson(e.to_string())),
    };

    let entries = match data {
        Value::Array(entries) => entries,
        other => return ReleaseFeed::Issue(FeedIssue::UnexpectedShape(json_type_name(&other))),
    };

    let releases = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            if !entry.is_object() {
                tracing::debug!("Skipping release #{} that is not a JSON object", index);
                return None;
            }
            match serde_json::from_value::<ReleaseJson>(entry) {
                Ok(json) => Some(Release::from_json_struct(json)),
                Err(e) => {
                    tracing::debug!("Skipping malformed release #{}: {}", index, e);
                    None
                }
            }
        })
        .collect();

    ReleaseFeed::Listed(releases)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub struct GitHubClient {
    credential: Credential,
    client: Client,
}

impl ReleaseClient for GitHubClient {
    #[instrument(skip_all)]
    async fn list_releases(&self, config: &Config) -> Result<String> {
        let current_span = tracing::Span::current();
        current_span.pb_set_style(&spinner_style("{msg}")?);
        current_span.pb_set_message(&format!(
            "Fetching releases of {}/{}...",
            config.owner, config.repository
        ));
        current_span.pb_set_finish_message(&format!(
            "Fetching releases of {}/{}... Done",
            config.owner, config.repository
        ));

        let url = config.releases_url();
        let response = self
            .client
            .get(&url)
            .headers(self.api_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to request release list from {url}"))?;

        // Error bodies are JSON objects and are reported by the decoder.
        if !response.status().is_success() {
            tracing::warn!("GitHub API request failed: {}", response.status());
        }

        response
            .text()
            .await
            .context("Failed to read release list response")
    }

    #[instrument(skip_all)]
    async fn download_asset(&self, asset: &Asset, path: &Path) -> Result<u64> {
        let current_span = tracing::Span::current();
        current_span.pb_set_style(&progress_bar_style()?);
        if let Some(size) = asset.size {
            current_span.pb_set_length(size);
        }
        current_span.pb_set_message(&format!("Downloading {}...", asset.display_name()));
        current_span.pb_set_finish_message(&format!(
            "Downloading {}... Complete!",
            asset.display_name()
        ));

        let response = self
            .client
            .get(&asset.browser_download_url)
            .send()
            .await?;

        if !response.status().is_success() {
            bail!("Download failed: {}", response.status());
        }

        let mut file = tokio::fs::File::create(path)
            .await
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut downloaded = 0u64;
        let mut stream = response.bytes_stream();

        use futures_util::StreamExt;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            current_span.pb_set_position(downloaded);
        }

        file.flush().await?;
        Ok(downloaded)
    }
}

impl GitHubClient {
    pub fn new(credential: Credential) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("artifact-fetcher/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { credential, client })
    }

    fn api_headers(&self) -> Result<HeaderMap> {
        let mut authorization = HeaderValue::from_str(&self.credential.bearer())
            .context("The PAT value is not a valid HTTP header value")?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(
            GITHUB_API_VERSION_HEADER,
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        Ok(headers)
    }
}
