// =============================================================================
// tabular.rs - JSON LINES IN, SPREADSHEET OUT
// =============================================================================
//
// Reads the line-record file back one line at a time and re-emits it as CSV
// with a fixed header and CRLF row endings. Every line must be a complete
// ProductRecord: a line that fails to parse, is missing a key, or has an
// extra one stops the conversion and nothing is written under the CSV name.
// =============================================================================

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::error::ScrapeError;
use crate::models::{ProductRecord, PRODUCT_FIELDS};
use crate::output::replace_file;

/// Convert the JSON Lines file at `source` into a CSV table at `dest`.
///
/// Returns the number of data rows written (the header is not counted).
pub fn convert_jsonl_to_csv(source: &Path, dest: &Path) -> Result<usize, ScrapeError> {
    let input = File::open(source).map_err(|e| ScrapeError::io(source, e))?;
    let reader = BufReader::new(input);

    let rows = replace_file(dest, |out| {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(out);
        writer.write_record(PRODUCT_FIELDS)?;

        let mut rows = 0usize;
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| ScrapeError::io(source, e))?;
            let record: ProductRecord =
                serde_json::from_str(&line).map_err(|source| ScrapeError::MalformedRecord {
                    line: index + 1,
                    source,
                })?;
            writer.serialize(&record)?;
            rows += 1;
        }

        writer.flush().map_err(|e| ScrapeError::io(dest, e))?;
        Ok(rows)
    })?;

    info!(
        source = %source.display(),
        dest = %dest.display(),
        rows = rows,
        "CSV table written"
    );
    Ok(rows)
}
