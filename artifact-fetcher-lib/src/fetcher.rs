use crate::artifacts::{asset_file_name, prepare_artifacts_dir};
use crate::config::Config;
use crate::error::FeedIssue;
use crate::github::{ReleaseFeed, decode_releases};
use crate::release_client::ReleaseClient;
use crate::version_matcher::VersionMatcher;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedArtifact {
    pub file_name: String,
    pub source_url: String,
    pub path: PathBuf,
    pub bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchSummary {
    /// Tags of the releases that passed the matcher, in listing order
    pub matched_tags: Vec<String>,

    /// Files written to the artifacts folder, in download order
    pub downloaded: Vec<DownloadedArtifact>,

    /// Set when the release listing could not be decoded
    pub feed_issue: Option<FeedIssue>,
}

impl FetchSummary {
    pub fn status_message(&self, config: &Config) -> String {
        if self.matched_tags.is_empty() {
            return format!(
                "{} {}",
                "No published release of".yellow(),
                format!(
                    "{}/{} matches {}",
                    config.owner, config.repository, config.base_version
                )
                .yellow()
                .bold(),
            );
        }

        let assets = self.downloaded.len();
        let releases = self.matched_tags.len();
        format!(
            "{} {} {} {} {}",
            "Downloaded".dimmed(),
            format!("{assets}").green().bold(),
            format!("{} from", plural(assets, "asset")).dimmed(),
            format!("{releases}").green().bold(),
            format!("{}.", plural(releases, "release")).dimmed(),
        )
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

/// Downloads every asset of the published releases matching `config.base_version`
/// into `config.artifacts_dir`, which is emptied first.
///
/// Releases and assets are processed one at a time in listing order. A release
/// listing that is not a JSON array yields an empty folder, not an error. Any
/// failed download aborts the run.
pub async fn fetch_release_artifacts<C: ReleaseClient>(
    config: &Config,
    client: &C,
) -> Result<FetchSummary> {
    let matcher = VersionMatcher::new(&config.base_version)?;

    let body = client.list_releases(config).await.with_context(|| {
        format!(
            "Failed to list releases of {}/{}",
            config.owner, config.repository
        )
    })?;

    prepare_artifacts_dir(&config.artifacts_dir)?;

    let mut summary = FetchSummary::default();
    let releases = match decode_releases(&body) {
        ReleaseFeed::Listed(releases) => releases,
        ReleaseFeed::Issue(issue) => {
            tracing::warn!("{}", issue.to_string().yellow());
            summary.feed_issue = Some(issue);
            Vec::new()
        }
    };
    tracing::debug!("Release listing contains {} entries", releases.len());

    for release in releases.iter().filter(|release| matcher.selects(release)) {
        let tag = release.tag_name.clone().unwrap_or_default();
        tracing::info!("Found valid release: {}", tag);

        for asset in &release.assets {
            let file_name = asset_file_name(&asset.browser_download_url)?;
            let path = config.artifacts_dir.join(&file_name);

            let bytes = client
                .download_asset(asset, &path)
                .await
                .with_context(|| format!("Failed to download {}", asset.browser_download_url))?;

            tracing::info!("Downloaded {} from {}", file_name, asset.browser_download_url);
            summary.downloaded.push(DownloadedArtifact {
                file_name,
                source_url: asset.browser_download_url.clone(),
                path,
                bytes,
            });
        }

        summary.matched_tags.push(tag);
    }

    Ok(summary)
}
