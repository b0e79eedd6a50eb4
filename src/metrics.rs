// ═══════════════════════════════════════════════════════════════
// RUN STATISTICS - What happened, in numbers
// ═══════════════════════════════════════════════════════════════
//
// The output files alone can't tell "this page has no rating" apart from
// "the site changed its markup and every pattern missed". These counters can,
// or at least they make it obvious. One RunStats per run, owned by the driver,
// turned into a serializable RunSummary at the end.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::fetcher::FetchedPage;
use crate::models::ProductRecord;

/// Number of fields the extractor can miss (everything but `url`).
const EXTRACTED_FIELDS: usize = 9;

/// What gets logged (as JSON) when a run finishes.
#[derive(Debug, Serialize, Clone)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub pages_fetched: u64,
    pub bytes_fetched: u64,
    pub non_success_responses: u64,
    /// Pages where every pattern missed.
    pub blank_records: u64,
    pub records_written: u64,
    pub rows_converted: u64,
    /// How many records fell back to the default, per field.
    pub defaulted_fields: BTreeMap<String, u64>,
    pub jsonl_path: String,
    pub csv_path: String,
}

pub struct RunStats {
    run_id: Uuid,
    started_at: DateTime<Utc>,
    start_time: Instant,
    pages_fetched: u64,
    bytes_fetched: u64,
    non_success_responses: u64,
    blank_records: u64,
    records_written: u64,
    rows_converted: u64,
    defaulted_fields: BTreeMap<&'static str, u64>,
}

impl RunStats {
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
            start_time: Instant::now(),
            pages_fetched: 0,
            bytes_fetched: 0,
            non_success_responses: 0,
            blank_records: 0,
            records_written: 0,
            rows_converted: 0,
            defaulted_fields: BTreeMap::new(),
        }
    }

    pub fn record_page(&mut self, page: &FetchedPage) {
        self.pages_fetched += 1;
        self.bytes_fetched += page.body.len() as u64;
        if !page.status.is_success() {
            self.non_success_responses += 1;
        }
    }

    pub fn record_extraction(&mut self, record: &ProductRecord) {
        let defaulted = record.defaulted_fields();
        if defaulted.len() == EXTRACTED_FIELDS {
            self.blank_records += 1;
        }
        for field in defaulted {
            *self.defaulted_fields.entry(field).or_insert(0) += 1;
        }
    }

    pub fn set_records_written(&mut self, count: usize) {
        self.records_written = count as u64;
    }

    pub fn set_rows_converted(&mut self, count: usize) {
        self.rows_converted = count as u64;
    }

    pub fn snapshot(&self, jsonl_path: &Path, csv_path: &Path) -> RunSummary {
        RunSummary {
            run_id: self.run_id,
            started_at: self.started_at,
            finished_at: Utc::now(),
            elapsed_ms: self.start_time.elapsed().as_millis() as u64,
            pages_fetched: self.pages_fetched,
            bytes_fetched: self.bytes_fetched,
            non_success_responses: self.non_success_responses,
            blank_records: self.blank_records,
            records_written: self.records_written,
            rows_converted: self.rows_converted,
            defaulted_fields: self
                .defaulted_fields
                .iter()
                .map(|(field, count)| (field.to_string(), *count))
                .collect(),
            jsonl_path: jsonl_path.display().to_string(),
            csv_path: csv_path.display().to_string(),
        }
    }
}
