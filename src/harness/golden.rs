//! The persisted golden table: a line-delimited JSON artifact.
//!
//! One entry per line, each annotated with its producing operation and
//! argument literal for human audit. The annotations play no role in
//! comparison — the oracle is purely positional. The artifact is never
//! hand-edited; the only legitimate mutation path is a full rewrite from a
//! replayed pass (`rrh update`).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::errors::{HarnessError, Result};

use super::invoker::InvocationRecord;
use super::registry::Value;

/// One recorded expectation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenEntry {
    /// Producing operation (informational).
    pub op: String,
    /// Argument literal (informational).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    /// The expected output value.
    pub value: Value,
}

/// Load the golden table, one JSON object per non-empty line.
///
/// A malformed line is fatal with a line-numbered diagnostic: a damaged
/// artifact must never be half-loaded into a shorter table, or the cursor
/// walk would report phantom drift instead of the real problem.
pub fn load(path: &Path) -> Result<Vec<GoldenEntry>> {
    let text = fs::read_to_string(path).map_err(|source| HarnessError::io(path, source))?;
    let mut table = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let entry: GoldenEntry =
            serde_json::from_str(line).map_err(|e| HarnessError::GoldenParse {
                path: path.to_path_buf(),
                line: index + 1,
                details: e.to_string(),
            })?;
        table.push(entry);
    }
    Ok(table)
}

/// Render an output log as the artifact's literal textual form.
///
/// Fatal if any record is a word-size skip: regenerated golden data must be
/// complete, which is only possible where the native width is maximal.
pub fn render(log: &[InvocationRecord]) -> Result<String> {
    let mut out = String::new();
    for record in log {
        let Some(value) = &record.value else {
            return Err(HarnessError::ArchitectureMismatch {
                native_bits: usize::BITS,
            });
        };
        let entry = GoldenEntry {
            op: record.op.to_string(),
            arg: record.arg.clone(),
            value: value.clone(),
        };
        out.push_str(&serde_json::to_string(&entry)?);
        out.push('\n');
    }
    Ok(out)
}

/// Replace the artifact wholesale with the rendering of `log`.
///
/// Refuses to run on a narrow architecture before touching the generator
/// output at all: values recorded there would be architecture-specific and
/// non-portable.
pub fn regenerate(path: &Path, log: &[InvocationRecord]) -> Result<()> {
    if usize::BITS < 64 {
        return Err(HarnessError::ArchitectureMismatch {
            native_bits: usize::BITS,
        });
    }
    let rendered = render(log)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| HarnessError::io(parent, source))?;
    }
    fs::write(path, rendered).map_err(|source| HarnessError::io(path, source))
}
