use crate::ui;
use anyhow::Result;
use artifact_fetcher_lib::config::{Config, Credential, DEFAULT_ARTIFACTS_DIR, DEFAULT_OWNER};
use artifact_fetcher_lib::fetcher::fetch_release_artifacts;
use artifact_fetcher_lib::github::GitHubClient;
use clap::Parser;
use clap::error::ErrorKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "artifact-fetcher")]
#[command(about = "Download the assets of GitHub releases matching a base version")]
#[command(version)]
pub struct Cli {
    /// Repository to fetch releases from (e.g. ibc-relay)
    pub repository: String,

    /// Version that release tags must match (e.g. 1.2.3 matches v1.2.3, 1.2.3-rc1, 1.2.3-hotfix)
    pub base_version: String,

    /// Organisation or user owning the repository
    #[arg(long, default_value = DEFAULT_OWNER)]
    pub owner: String,

    /// Folder that is cleared and then filled with the downloaded assets
    #[arg(long, short, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub output_dir: PathBuf,

    /// Show debug output, such as skipped release entries
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    /// Parses the process arguments. A wrong argument count prints the usage
    /// on stdout and exits with status 1; `--help` and `--version` exit normally.
    pub fn parse_or_exit() -> Self {
        match Self::try_parse() {
            Ok(cli) => cli,
            Err(err)
                if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) =>
            {
                err.exit()
            }
            Err(err) => {
                println!("{}", err.render());
                std::process::exit(1);
            }
        }
    }

    pub fn config(&self) -> Result<Config> {
        Ok(Config {
            owner: self.owner.clone(),
            artifacts_dir: self.output_dir.clone(),
            ..Config::new(&self.repository, &self.base_version)?
        })
    }

    pub async fn run(self) -> Result<()> {
        let config = self.config()?;
        let credential = Credential::from_env()?;
        let github_client = GitHubClient::new(credential)?;

        ui::info(&format!(
            "Fetching releases of {}/{} matching {}...",
            config.owner, config.repository, config.base_version
        ));

        let summary = fetch_release_artifacts(&config, &github_client).await?;

        if summary.matched_tags.is_empty() {
            ui::warning(&summary.status_message(&config));
        } else {
            ui::success(&summary.status_message(&config));
        }
        ui::info(&format!("Artifacts folder: {}", config.artifacts_dir.display()));

        Ok(())
    }
}
