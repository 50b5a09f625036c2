//! One-shot export of a flat `name -> value` mapping to CSV or JSON.
//!
//! Entries are written sorted by name. Existing files are truncated. Writes are
//! not atomic: a crash mid-write leaves a partial file behind.

use std::{collections::HashMap, fs::File, io::Write, path::Path};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, info};

use crate::error::{MeteoError, Result};

pub const CSV_HEADER: [&str; 2] = ["Variable", "Value"];

fn sorted(data: &HashMap<String, f64>) -> Vec<(&str, f64)> {
    let mut entries: Vec<(&str, f64)> = data.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

fn create(path: &Path) -> Result<File> {
    debug!(path = %path.display(), "opening export target");
    File::create(path).map_err(|e| MeteoError::io(path, e))
}

/// Write `Variable,Value` followed by one `name,value` record per entry.
///
/// Names containing commas or quotes are quoted.
pub fn export_csv(path: impl AsRef<Path>, data: &HashMap<String, f64>) -> Result<()> {
    let path = path.as_ref();
    let file = create(path)?;

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);

    let to_io = |e: csv::Error| MeteoError::io(path, e.into());

    writer.write_record(CSV_HEADER).map_err(to_io)?;
    for (name, value) in sorted(data) {
        writer.write_record([name, value.to_string().as_str()]).map_err(to_io)?;
    }
    writer.flush().map_err(|e| MeteoError::io(path, e))?;

    info!(path = %path.display(), records = data.len(), "exported CSV");
    Ok(())
}

/// Write the mapping as a flat JSON object indented with four spaces.
pub fn export_json(path: impl AsRef<Path>, data: &HashMap<String, f64>) -> Result<()> {
    let path = path.as_ref();
    let mut file = create(path)?;

    let ordered: serde_json::Map<String, serde_json::Value> = sorted(data)
        .into_iter()
        .map(|(name, value)| (name.to_string(), serde_json::Value::from(value)))
        .collect();

    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    ordered.serialize(&mut ser).map_err(|e| MeteoError::io(path, e.into()))?;

    file.write_all(&buf).map_err(|e| MeteoError::io(path, e))?;

    info!(path = %path.display(), records = data.len(), "exported JSON");
    Ok(())
}
