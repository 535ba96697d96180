use crate::config::Config;
use crate::github::Asset;
use crate::release_client::ReleaseClient;
use anyhow::{Context, anyhow, bail};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

/// Serves a canned release listing and canned asset bodies, and records every request.
#[derive(Default)]
pub struct MockReleaseClient {
    listing: Option<String>,
    assets: HashMap<String, Vec<u8>>,
    listing_requests: Mutex<usize>,
    downloaded_urls: Mutex<Vec<String>>,
}

impl MockReleaseClient {
    pub fn new(listing: &str) -> Self {
        Self {
            listing: Some(listing.to_string()),
            ..Self::default()
        }
    }

    /// A client whose listing request fails as if the network were down.
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, url: &str, content: &[u8]) -> Self {
        self.assets.insert(url.to_string(), content.to_vec());
        self
    }

    pub fn listing_requests(&self) -> usize {
        *self.listing_requests.lock().unwrap()
    }

    pub fn downloaded_urls(&self) -> Vec<String> {
        self.downloaded_urls.lock().unwrap().clone()
    }
}

impl ReleaseClient for MockReleaseClient {
    async fn list_releases(&self, _config: &Config) -> anyhow::Result<String> {
        *self.listing_requests.lock().unwrap() += 1;
        self.listing
            .clone()
            .ok_or_else(|| anyhow!("connection refused"))
    }

    async fn download_asset(&self, asset: &Asset, output_path: &Path) -> anyhow::Result<u64> {
        self.downloaded_urls
            .lock()
            .unwrap()
            .push(asset.browser_download_url.clone());

        let Some(content) = self.assets.get(&asset.browser_download_url) else {
            bail!("Download failed: 404 Not Found");
        };

        fs::write(output_path, content)
            .context(format!("Failed to write asset file: {:?}", output_path))?;

        Ok(content.len() as u64)
    }
}
