use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use ng_core::{Error, Fetcher};
use ng_guardian::logging::init_logging;
use ng_guardian::{handle_command, HttpFetcher, ReportCommands};
use tokio_util::sync::CancellationToken;
use tracing::info;

mod render;

#[derive(Parser, Debug)]
#[command(name = "news2go", author, version, about = "Search and list Guardian news reports", long_about = None)]
struct Cli {
    /// Print reports as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Log request details
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: ReportCommands,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let fetcher: Arc<dyn Fetcher> =
        Arc::new(HttpFetcher::new().context("Failed to set up the HTTP client")?);

    let token = CancellationToken::new();
    let interrupt = {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted, abandoning load");
                token.cancel();
            }
        })
    };

    let outcome = handle_command(cli.command, fetcher, token).await;
    interrupt.abort();

    let state = match outcome {
        Ok(state) => state,
        Err(Error::Cancelled) => return Ok(ExitCode::from(130)),
        Err(e) => return Err(e).context("Failed to run command"),
    };

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let shown = render::render_state(&state, cli.json, &mut stdout.lock(), &mut stderr.lock())
        .context("Failed to write output")?;

    Ok(if shown { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
