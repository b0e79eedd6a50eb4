// =============================================================================
// pipeline.rs - FETCH, EXTRACT, WRITE, CONVERT. IN THAT ORDER. ONE AT A TIME.
// =============================================================================
//
// The driver. It walks the configured URLs strictly in order, awaiting each
// fetch before starting the next, and keeps every record in memory. Only when
// all pages are in does it touch the disk: the line-record file first, then
// the CSV built from it.
//
// The first failed fetch aborts the whole batch before any file is written.
// There is no skip-and-continue.
// =============================================================================

use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::config::Config;
use crate::error::ScrapeError;
use crate::extractor::extract_product;
use crate::fetcher::PageFetcher;
use crate::jsonl::write_records;
use crate::metrics::{RunStats, RunSummary};
use crate::models::ProductRecord;
use crate::tabular::convert_jsonl_to_csv;

/// Run the whole pipeline once and report what happened.
pub async fn crawl_and_convert(
    config: &Config,
    fetcher: &PageFetcher,
) -> Result<RunSummary, ScrapeError> {
    let run_id = Uuid::new_v4();
    let span = info_span!("crawl", run_id = %run_id);

    async move {
        let mut stats = RunStats::new(run_id);
        let total = config.product_urls.len();
        info!(urls = total, "Starting crawl");

        let mut records: Vec<ProductRecord> = Vec::with_capacity(total);
        for (index, url) in config.product_urls.iter().enumerate() {
            let page = fetcher.fetch(url).await?;
            stats.record_page(&page);

            let record = extract_product(&page.body, &page.url);
            stats.record_extraction(&record);
            info!("[{}/{}] {}", index + 1, total, record);

            records.push(record);
        }

        write_records(&records, &config.jsonl_path)?;
        stats.set_records_written(records.len());

        let rows = convert_jsonl_to_csv(&config.jsonl_path, &config.csv_path)?;
        stats.set_rows_converted(rows);

        Ok(stats.snapshot(&config.jsonl_path, &config.csv_path))
    }
    .instrument(span)
    .await
}
