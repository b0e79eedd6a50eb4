// =============================================================================
// jsonl.rs - THE LINE-RECORD WRITER
// =============================================================================
//
// One ProductRecord per line, one compact JSON object per record, in the
// order given. No header, no trailing comma, no surrounding array. Each line
// stands on its own, which is the entire point of JSON Lines.
// =============================================================================

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::ScrapeError;
use crate::models::ProductRecord;
use crate::output::replace_file;

/// Overwrite `path` with `records` as JSON Lines. An empty slice produces an
/// empty file.
pub fn write_records(records: &[ProductRecord], path: &Path) -> Result<(), ScrapeError> {
    replace_file(path, |out| {
        for record in records {
            serde_json::to_writer(&mut *out, record).map_err(ScrapeError::Serialize)?;
            out.write_all(b"\n").map_err(|e| ScrapeError::io(path, e))?;
        }
        Ok(())
    })?;

    info!(
        path = %path.display(),
        records = records.len(),
        "Line-record file written"
    );
    Ok(())
}
