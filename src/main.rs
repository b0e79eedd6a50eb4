// ██████╗ ██████╗  ██████╗ ██████╗ ██╗   ██╗ ██████╗████████╗
// ██╔══██╗██╔══██╗██╔═══██╗██╔══██╗██║   ██║██╔════╝╚══██╔══╝
// ██████╔╝██████╔╝██║   ██║██║  ██║██║   ██║██║        ██║
// ██╔═══╝ ██╔══██╗██║   ██║██║  ██║██║   ██║██║        ██║
// ██║     ██║  ██║╚██████╔╝██████╔╝╚██████╔╝╚██████╗   ██║
// ╚═╝     ╚═╝  ╚═╝ ╚═════╝ ╚═════╝  ╚═════╝  ╚═════╝   ╚═╝
//
// S C R A P E   E N G I N E
//
// Fetch a few product pages, regex ten fields out of each, write JSON Lines,
// turn the JSON Lines into CSV. Strictly one page at a time.

mod config;
mod error;
mod extractor;
mod fetcher;
mod jsonl;
mod metrics;
mod models;
mod output;
mod pipeline;
mod tabular;
#[cfg(test)]
mod test_support;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::fetcher::PageFetcher;

fn print_banner(config: &Config) {
    let banner = format!(
        r#"
    ╔══════════════════════════════════════════════════════╗
    ║              PRODUCT SCRAPE ENGINE v{:<17}║
    ║                                                      ║
    ║   fetch -> extract -> JSON Lines -> CSV              ║
    ║   {:>3} product page(s) queued, one at a time          ║
    ╚══════════════════════════════════════════════════════╝
"#,
        env!("CARGO_PKG_VERSION"),
        config.product_urls.len(),
    );
    println!("{}", banner);
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_target(true);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(true).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    init_tracing(config.json_logs);

    print_banner(&config);

    info!(
        urls = config.product_urls.len(),
        jsonl = %config.jsonl_path.display(),
        csv = %config.csv_path.display(),
        timeout = ?config.request_timeout,
        "Configuration loaded"
    );

    let fetcher = PageFetcher::new(&config).context("failed to set up HTTP client")?;
    let summary = pipeline::crawl_and_convert(&config, &fetcher)
        .await
        .context("crawl aborted")?;

    let summary_json = serde_json::to_string(&summary)?;
    info!(
        summary = %summary_json,
        "Run complete: {} records, {} rows",
        summary.records_written,
        summary.rows_converted
    );

    Ok(())
}
