//! Snapshot loading.
//!
//! A snapshot file is a JSON array of objects. Each object becomes a
//! [`Record`] with its field order preserved.

use crate::error::{KeyedDiffError, ParseErrorKind, Result as KeyedResult};
use crate::model::{json_type_name, Record};
use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Path that reads the snapshot from stdin instead of a file.
pub const STDIN_PATH: &str = "-";

/// Parse snapshot text into records.
///
/// # Errors
///
/// Fails when the text is not valid JSON, the root is not an array, or an
/// entry is not an object.
pub fn parse_snapshot_str(content: &str) -> KeyedResult<Vec<Record>> {
    let value: Value = serde_json::from_str(content)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(KeyedDiffError::parse(
                "snapshot root",
                ParseErrorKind::NotAnArray {
                    found: json_type_name(&other),
                },
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(fields.into_iter().collect()),
            other => Err(KeyedDiffError::parse(
                format!("entry {index}"),
                ParseErrorKind::NotAnObject {
                    index,
                    found: json_type_name(&other),
                },
            )),
        })
        .collect()
}

/// Load a snapshot from a file, or from stdin when `path` is `-`.
pub fn load_snapshot(path: &Path, quiet: bool) -> Result<Vec<Record>> {
    let content = if path == Path::new(STDIN_PATH) {
        if !quiet {
            tracing::info!("Reading snapshot from stdin");
        }
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read snapshot from stdin")?;
        buffer
    } else {
        if !quiet {
            tracing::info!("Reading snapshot: {:?}", path);
        }
        std::fs::read_to_string(path)
            .map_err(|e| KeyedDiffError::io(path, e))
            .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?
    };

    let records = parse_snapshot_str(&content)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))?;

    if !quiet {
        tracing::info!("Loaded {} records", records.len());
    }
    Ok(records)
}
