//! Anchored in-place text surgery.
//!
//! Locates a unique span by an exact first-line match and a closing
//! delimiter line, then substitutes new content between them, leaving
//! everything outside the span untouched. Shared by the demo-transcript
//! rewriter; golden data itself lives in a standalone artifact and does not
//! need this primitive.

use std::path::Path;

use memchr::memmem;

use crate::core::errors::{HarnessError, Result};

/// Replace the span from `block`'s first line up to (but not including) the
/// `terminator` line with `block`.
///
/// The anchor is `block`'s own first line and must occur exactly once in
/// `data`, on a line of its own; the terminator must follow it, likewise on
/// a line of its own. The terminator line itself is retained from the
/// original text. Fatal if either cannot be located uniquely — that means
/// the external file's format drifted out from under the harness.
pub fn anchored_replace(data: &str, block: &str, terminator: &str, path: &Path) -> Result<String> {
    let block = canonicalize(block);
    let anchor = block.lines().next().unwrap_or_default();
    if anchor.is_empty() {
        return Err(HarnessError::AnchorNotFound {
            anchor: String::new(),
            path: path.to_path_buf(),
        });
    }

    let anchor_needle = format!("\n{anchor}\n");
    let mut hits = memmem::find_iter(data.as_bytes(), anchor_needle.as_bytes());
    let Some(start) = hits.next() else {
        return Err(HarnessError::AnchorNotFound {
            anchor: anchor.to_string(),
            path: path.to_path_buf(),
        });
    };
    if hits.next().is_some() {
        return Err(HarnessError::AnchorAmbiguous {
            anchor: anchor.to_string(),
            path: path.to_path_buf(),
        });
    }

    let term_needle = format!("\n{terminator}\n");
    let search_from = start + 1;
    let Some(term_offset) = memmem::find(data[search_from..].as_bytes(), term_needle.as_bytes())
    else {
        return Err(HarnessError::TerminatorNotFound {
            terminator: terminator.to_string(),
            path: path.to_path_buf(),
        });
    };
    let term_at = search_from + term_offset;

    // Keep everything through the newline preceding the anchor line, splice
    // in the block, resume at the terminator line.
    let mut out = String::with_capacity(data.len() + block.len());
    out.push_str(&data[..=start]);
    out.push_str(&block);
    out.push_str(&data[term_at + 1..]);
    Ok(out)
}

/// Canonical block form: every line `\n`-terminated, exactly one trailing
/// newline.
fn canonicalize(block: &str) -> String {
    let mut out = block.trim_end_matches('\n').to_string();
    out.push('\n');
    out
}
