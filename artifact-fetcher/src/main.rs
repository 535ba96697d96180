mod cli;
mod ui;

use anyhow::Result;
use artifact_fetcher_lib::logging::initialize_logging;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_or_exit();
    initialize_logging(cli.verbose);
    cli.run().await
}
