use crate::config::Config;
use crate::github::Asset;
use anyhow::Result;
use std::path::Path;

pub trait ReleaseClient {
    /// Returns the raw body of the release listing for the configured repository.
    fn list_releases(&self, config: &Config) -> impl Future<Output = Result<String>> + Send;

    /// Writes the whole asset to `output_path`, replacing any existing file.
    /// Returns the number of bytes written.
    fn download_asset(
        &self,
        asset: &Asset,
        output_path: &Path,
    ) -> impl Future<Output = Result<u64>> + Send;
}
