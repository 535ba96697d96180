use anyhow::{Context, Result, bail};
use reqwest::Url;
use std::path::Path;

/// Deletes `path` if it exists and creates it again empty.
pub fn prepare_artifacts_dir(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("Failed to clear artifacts folder {}", path.display()))?;
    }
    std::fs::create_dir_all(path)
        .with_context(|| format!("Failed to create artifacts folder {}", path.display()))?;
    Ok(())
}

/// File name for a downloaded asset: the last path segment of its URL.
pub fn asset_file_name(download_url: &str) -> Result<String> {
    let url =
        Url::parse(download_url).with_context(|| format!("Invalid download URL: {download_url}"))?;

    let file_name = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();

    if file_name.is_empty() || file_name == "." || file_name == ".." {
        bail!("Download URL has no file name: {download_url}");
    }

    Ok(file_name.to_string())
}
