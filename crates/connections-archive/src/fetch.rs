//! Page fetcher: load one URL in a browser tab and capture the rendered HTML.

use crate::config::ArchiveConfig;
use crate::renderer::{RenderContext, Renderer};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Render `config.url` and return the page source after the settle delay.
///
/// The tab is closed on every path. The browser itself belongs to the caller.
pub async fn fetch_rendered_html(renderer: &dyn Renderer, config: &ArchiveConfig) -> Result<String> {
    let mut ctx = renderer
        .new_context()
        .await
        .context("failed to open browser tab")?;

    let result = load(ctx.as_mut(), config).await;

    if let Err(e) = ctx.close().await {
        warn!("failed to close browser tab: {e:#}");
    }
    result
}

async fn load(ctx: &mut dyn RenderContext, config: &ArchiveConfig) -> Result<String> {
    let nav = ctx
        .navigate(&config.url, config.timeout_ms)
        .await
        .with_context(|| format!("failed to load {}", config.url))?;
    info!(
        url = %nav.final_url,
        load_time_ms = nav.load_time_ms,
        settle_ms = config.settle.as_millis() as u64,
        "page loaded, waiting for client-side rendering"
    );

    tokio::time::sleep(config.settle).await;

    ctx.get_html()
        .await
        .context("failed to read rendered page source")
}
