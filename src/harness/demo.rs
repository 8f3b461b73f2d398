//! Demonstration run and its recorded transcript.
//!
//! `demonstrate` takes the writer as a parameter, so capturing its output is
//! a plain in-memory buffer read — no process-wide stream redirection, no
//! pipe, no second thread. The expected transcript lives in the comment
//! block at the bottom of this file and is rewritten by `rrh update-demo`
//! through the anchored-replace primitive.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::core::errors::{HarnessError, Result};
use crate::rng::StreamRng;

use super::replace::anchored_replace;

/// Seed for the demonstration run. Independent of the regression seed so
/// transcript churn never implies golden churn.
pub const DEMO_SEED: u64 = 0x5EED;

/// First line of the transcript block; the anchored-replace anchor.
const ANCHOR: &str = "// Output:";
/// Closing delimiter line of the transcript block.
const TERMINATOR: &str = "// ---";

/// This file's own source text, for transcript extraction.
const SOURCE: &str = include_str!("demo.rs");

/// Run the demonstration scenario once, writing to `out`.
///
/// Every draw is deterministic in `DEMO_SEED`; the exact call sequence is
/// load-bearing, since it fixes which stream positions each printed value
/// comes from.
pub fn demonstrate(out: &mut dyn Write) -> io::Result<()> {
    let mut rng = StreamRng::from_seed(DEMO_SEED);

    writeln!(
        out,
        "next_u64: {} {} {}",
        rng.next_u64(),
        rng.next_u64(),
        rng.next_u64()
    )?;
    writeln!(
        out,
        "bounded_u64(100): {} {} {} {} {}",
        rng.bounded_u64(100).map_err(io_invalid)?,
        rng.bounded_u64(100).map_err(io_invalid)?,
        rng.bounded_u64(100).map_err(io_invalid)?,
        rng.bounded_u64(100).map_err(io_invalid)?,
        rng.bounded_u64(100).map_err(io_invalid)?
    )?;
    writeln!(
        out,
        "next_f64: {:.4} {:.4} {:.4}",
        rng.next_f64(),
        rng.next_f64(),
        rng.next_f64()
    )?;
    writeln!(
        out,
        "next_f32: {:.4} {:.4} {:.4}",
        rng.next_f32(),
        rng.next_f32(),
        rng.next_f32()
    )?;
    writeln!(out, "permutation(8): {:?}", rng.permutation(8))?;
    Ok(())
}

fn io_invalid(e: crate::rng::RngError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, e)
}

/// The transcript recorded in this file's comment block.
#[must_use]
pub fn recorded_transcript() -> String {
    let mut lines = SOURCE.lines();
    for line in lines.by_ref() {
        if line == ANCHOR {
            break;
        }
    }
    let mut out = String::new();
    for line in lines {
        if line == TERMINATOR {
            break;
        }
        if let Some(content) = line.strip_prefix("// ") {
            out.push_str(content);
            out.push('\n');
        }
    }
    out
}

/// Render captured demonstration output as the comment block.
#[must_use]
pub fn render_transcript(captured: &str) -> String {
    let mut block = String::from(ANCHOR);
    block.push('\n');
    for line in captured.lines() {
        if line.is_empty() {
            continue;
        }
        block.push_str("// ");
        block.push_str(line);
        block.push('\n');
    }
    block
}

/// Re-run the demonstration and rewrite the transcript block in the source
/// file at `path` (normally this file).
///
/// The caller is expected to exit non-zero after a successful rewrite: the
/// run's own pass/fail result is meaningless once the expectation it was
/// checked against has been replaced.
pub fn update_transcript(path: &Path) -> Result<()> {
    let mut captured = Vec::new();
    demonstrate(&mut captured).map_err(|source| HarnessError::io(path, source))?;
    let captured = String::from_utf8(captured).map_err(|e| HarnessError::Serialization {
        context: "demo transcript",
        details: e.to_string(),
    })?;

    let block = render_transcript(&captured);
    let data = fs::read_to_string(path).map_err(|source| HarnessError::io(path, source))?;
    let updated = anchored_replace(&data, &block, TERMINATOR, path)?;
    fs::write(path, updated).map_err(|source| HarnessError::io(path, source))
}

// Output:
// next_u64: 716632666546416052 6139096880363046005 6727192872932819891
// bounded_u64(100): 97 93 30 68 5
// next_f64: 0.8540 0.2454 0.3463
// next_f32: 0.3949 0.1355 0.1764
// permutation(8): [2, 0, 6, 5, 1, 3, 4, 7]
// ---
