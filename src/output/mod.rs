mod formatter;

pub use formatter::{
    format_record_detail, format_record_table, format_summary, should_use_colors,
};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::Serialize;
use std::path::Path;

use crate::slate::{RunSummary, ScoreRecord};

/// JSON document written for downstream consumers (optimizer, report
/// renderer): the full record set plus the run summary.
#[derive(Debug, Serialize)]
pub struct RunDocument<'a> {
    pub records: &'a [ScoreRecord],
    pub summary: &'a RunSummary,
}

/// Write the run document to a JSON file atomically.
///
/// Consumers either see the previous complete file or the new complete
/// file, never a partially written run.
pub fn write_run_document(path: &Path, records: &[ScoreRecord], summary: &RunSummary) -> Result<()> {
    let doc = RunDocument { records, summary };

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, &doc).context("Failed to serialize run output")?;

    file.commit().context("Failed to save run output")?;

    Ok(())
}
