// Copyright 2026 Connections Archive Contributors
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use connections_archive::config::{
    ArchiveConfig, ARCHIVE_URL, DEFAULT_OUTPUT, DEFAULT_SETTLE_MS, DEFAULT_TIMEOUT_MS,
};
use connections_archive::logging::init_tracing;
use connections_archive::pipeline::{self, RunSummary};

#[derive(Parser)]
#[command(
    name = "connections-archive",
    about = "Collect every past NYT Connections answer into a CSV dataset",
    version
)]
struct Cli {
    /// Where to write the dataset (overwritten if it exists)
    #[arg(env = "CONNECTIONS_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Archive page to render
    #[arg(long, env = "CONNECTIONS_URL", default_value = ARCHIVE_URL)]
    url: String,

    /// Milliseconds to wait after load for client-side rendering
    #[arg(long, default_value_t = DEFAULT_SETTLE_MS)]
    settle_ms: u64,

    /// Navigation timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Chromium binary to launch
    #[arg(long, env = "CONNECTIONS_CHROMIUM_PATH")]
    chromium: Option<PathBuf>,

    /// Extract from a saved copy of the archive page instead of a browser
    #[arg(long, value_name = "FILE", conflicts_with = "check")]
    from_html: Option<PathBuf>,

    /// Summarize the existing dataset at OUTPUT without fetching
    #[arg(long)]
    check: bool,

    /// Output the run summary as JSON (machine-readable)
    #[arg(long)]
    json: bool,

    /// Suppress the success line
    #[arg(long, short)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> ArchiveConfig {
        ArchiveConfig {
            url: self.url.clone(),
            output: self.output.clone(),
            settle: Duration::from_millis(self.settle_ms),
            timeout_ms: self.timeout_ms,
            chromium: self.chromium.clone(),
        }
    }

    fn report(&self, summary: &RunSummary) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(summary)?);
        } else if !self.quiet {
            let d = &summary.dataset;
            let range = match (d.first_date, d.last_date) {
                (Some(first), Some(last)) => format!("{first} to {last}"),
                _ => "no dates".to_string(),
            };
            println!(
                "{} records over {} dates ({range}), {} undated: {}",
                d.records,
                d.distinct_dates,
                d.undated,
                summary.output.display()
            );
        }
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = cli.config();

    let outcome = if cli.check {
        match pipeline::check(&config.output) {
            Ok(summary) => Some(summary),
            Err(e) => {
                eprintln!("  Error: {e:#}");
                None
            }
        }
    } else if let Some(html_path) = &cli.from_html {
        pipeline::create_from_html_file(html_path, &config)
    } else {
        pipeline::create_connections_dataset(&config).await
    };

    match outcome {
        Some(summary) => cli.report(&summary),
        // The failure has already been reported.
        None => std::process::exit(1),
    }
}
