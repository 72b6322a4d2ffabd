//! Fetch → extract → write, behind a single top-level guard.
//!
//! Every fault from any stage surfaces at the guard as one diagnostic line
//! and is then suppressed. The browser is shut down exactly once whatever
//! the outcome, and the dataset is only written after the whole page has
//! been extracted, so a failed run never touches the output file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use connections_dataset::{extract_answers, Dataset, DatasetSummary};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ArchiveConfig;
use crate::fetch::fetch_rendered_html;
use crate::renderer::chromium::ChromiumRenderer;
use crate::renderer::Renderer;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub output: PathBuf,
    #[serde(flatten)]
    pub dataset: DatasetSummary,
}

/// Launch Chromium and build the dataset. `None` means the run failed and
/// the failure has already been reported.
pub async fn create_connections_dataset(config: &ArchiveConfig) -> Option<RunSummary> {
    let renderer = match ChromiumRenderer::launch(config.chromium.as_deref()).await {
        Ok(renderer) => renderer,
        Err(e) => {
            report_failure(&e);
            return None;
        }
    };
    info!("Chromium renderer initialized");

    create_with_renderer(&renderer, config).await
}

/// Build the dataset with an already-launched renderer, then shut it down.
pub async fn create_with_renderer(
    renderer: &dyn Renderer,
    config: &ArchiveConfig,
) -> Option<RunSummary> {
    let outcome = run(renderer, config).await;

    if let Err(e) = renderer.shutdown().await {
        warn!("browser shutdown failed: {e:#}");
    }

    guard(outcome)
}

/// Build the dataset from a saved copy of the archive page. No browser.
pub fn create_from_html_file(html_path: &Path, config: &ArchiveConfig) -> Option<RunSummary> {
    let outcome = std::fs::read_to_string(html_path)
        .with_context(|| format!("failed to read {}", html_path.display()))
        .and_then(|html| build_and_write(&html, &config.output));
    guard(outcome)
}

/// The unguarded pipeline: every fault propagates to the caller.
pub async fn run(renderer: &dyn Renderer, config: &ArchiveConfig) -> Result<RunSummary> {
    info!(url = %config.url, "fetching answer archive");
    let html = fetch_rendered_html(renderer, config).await?;
    build_and_write(&html, &config.output)
}

/// Extract records from `html` and persist them to `output`.
pub fn build_and_write(html: &str, output: &Path) -> Result<RunSummary> {
    let records = extract_answers(html).context("archive page has an unexpected structure")?;
    info!(records = records.len(), "extracted answers");

    let dataset = Dataset::from_traversal(records);
    dataset
        .write_csv(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    let summary = dataset.summary();
    info!(
        path = %output.display(),
        records = summary.records,
        undated = summary.undated,
        "dataset written"
    );

    Ok(RunSummary {
        output: output.to_path_buf(),
        dataset: summary,
    })
}

/// Summarize an existing dataset file without fetching anything.
pub fn check(path: &Path) -> Result<RunSummary> {
    let dataset =
        Dataset::read_csv(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(RunSummary {
        output: path.to_path_buf(),
        dataset: dataset.summary(),
    })
}

fn guard(outcome: Result<RunSummary>) -> Option<RunSummary> {
    match outcome {
        Ok(summary) => Some(summary),
        Err(e) => {
            report_failure(&e);
            None
        }
    }
}

/// The one-line diagnostic printed when a run fails.
pub fn failure_message(e: &anyhow::Error) -> String {
    format!("An error occurred while retrieving the connections history: {e:#}")
}

fn report_failure(e: &anyhow::Error) {
    debug!(error = ?e, "run aborted");
    eprintln!("{}", failure_message(e));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_write_reports_summary() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let html = "<div class=\"entry-content\"><ul>\
                    <li>June 3rd, 2024<ul><li><strong>A</strong> - x, y</li></ul></li>\
                    </ul></div>";

        let summary = build_and_write(html, &out).unwrap();
        assert_eq!(summary.output, out);
        assert_eq!(summary.dataset.records, 1);
        assert!(out.exists());
    }

    #[test]
    fn test_structural_error_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");

        let err = build_and_write("<html><body></body></html>", &out).unwrap_err();
        assert!(format!("{err:#}").contains("entry-content"));
        assert!(!out.exists());
    }

    #[test]
    fn test_check_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check(&dir.path().join("absent.csv")).is_err());
    }

    #[test]
    fn test_summary_serializes_flat() {
        let summary = RunSummary {
            output: PathBuf::from("data/connections.csv"),
            dataset: DatasetSummary::default(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["output"], "data/connections.csv");
        assert_eq!(json["records"], 0);
        assert!(json["first_date"].is_null());
    }
}
