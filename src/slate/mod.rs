mod types;

pub use types::{
    DstData, EntityRecord, EntityType, Exclusion, ExclusionReason, ExtValue, MalformedExtra,
    Position, PositionData, QbData, RbData, RunSummary, ScoreRecord, SharedProjection, Site,
    Slate, SlateInput, TeData, Tier, WrData,
};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load a slate input document from a JSON file.
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist or cannot be read
/// - The JSON does not match the slate input schema
pub fn load_slate(path: &Path) -> Result<SlateInput> {
    if !path.exists() {
        anyhow::bail!("Slate file not found at {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read slate file at {}", path.display()))?;

    let input: SlateInput = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse slate: invalid JSON in {}", path.display()))?;

    Ok(input)
}
