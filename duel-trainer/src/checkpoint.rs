//! JSON weights file for the policy table.
//!
//! Format:
//! ```text
//! {
//!   "version": 1,
//!   "checksum": <u64 xxhash of the weights text>,
//!   "weights": { "<position key>": [w0, w1, ...], ... }
//! }
//! ```
//!
//! Keys are sorted, so the same table always produces the same file. The
//! checksum covers the exact bytes of the `weights` object.

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use xxhash_rust::xxh64::xxh64;

use crate::error::CheckpointError;
use crate::policy::PolicyTable;

const VERSION: u32 = 1;

#[derive(Serialize)]
struct Document<'a> {
    version: u32,
    checksum: u64,
    weights: &'a RawValue,
}

#[derive(Deserialize)]
struct StoredDocument<'a> {
    version: u32,
    checksum: u64,
    #[serde(borrow)]
    weights: &'a RawValue,
}

/// Write `table` to `path`, returning the number of positions saved.
///
/// The file is written next to `path` first and renamed into place.
pub fn save(path: &Path, table: &PolicyTable) -> Result<usize, CheckpointError> {
    let sorted: BTreeMap<&str, &[f64]> = table.iter().collect();
    let weights = RawValue::from_string(serde_json::to_string(&sorted)?)?;
    let document = Document {
        version: VERSION,
        checksum: xxh64(weights.get().as_bytes(), 0),
        weights: &weights,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp = temp_path(path);
    let mut writer = BufWriter::new(File::create(&temp)?);
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writer.flush()?;
    drop(writer);
    fs::rename(&temp, path)?;

    Ok(table.len())
}

/// Read a table written by [`save`].
pub fn load(path: &Path) -> Result<PolicyTable, CheckpointError> {
    let content = fs::read_to_string(path).map_err(|source| CheckpointError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document: StoredDocument = serde_json::from_str(&content)?;

    if document.version != VERSION {
        return Err(CheckpointError::UnsupportedVersion(document.version));
    }
    if xxh64(document.weights.get().as_bytes(), 0) != document.checksum {
        return Err(CheckpointError::ChecksumMismatch);
    }

    let weights: HashMap<String, Vec<f64>> = serde_json::from_str(document.weights.get())?;
    for (key, values) in &weights {
        if let Some(&value) = values.iter().find(|w| !(w.is_finite() && **w > 0.0 && **w <= 1.0)) {
            return Err(CheckpointError::InvalidWeight {
                key: key.clone(),
                value,
            });
        }
    }

    Ok(PolicyTable::from(weights))
}

/// Like [`load`], but a missing file gives an empty table.
pub fn load_or_empty(path: &Path) -> Result<PolicyTable, CheckpointError> {
    if path.exists() {
        load(path)
    } else {
        warn!("weights file '{}' not found, starting from scratch", path.display());
        Ok(PolicyTable::new())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
