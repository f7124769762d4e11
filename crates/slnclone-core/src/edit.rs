//! Applying planned insertions to manifest text
//!
//! Insertion line indices always refer to the original text, so all of them
//! are applied together in a single pass. Lines that receive no insertion are
//! copied through unchanged, byte for byte.

use crate::solution::{detect_line_ending, Insertion};

/// Apply insertions to the original manifest text
///
/// Insertions targeting the same line keep their relative order. Any
/// insertion at or past the last line is appended to the end.
pub fn apply_insertions(text: &str, insertions: &[Insertion]) -> String {
    let mut ordered: Vec<&Insertion> = insertions.iter().collect();
    ordered.sort_by_key(|ins| ins.line);

    let extra: usize = ordered.iter().map(|ins| ins.text.len()).sum();
    let mut out = String::with_capacity(text.len() + extra + 2);
    let mut pending = ordered.into_iter().peekable();

    for (i, segment) in text.split_inclusive('\n').enumerate() {
        while let Some(ins) = pending.next_if(|ins| ins.line <= i) {
            out.push_str(&ins.text);
        }
        out.push_str(segment);
    }

    if pending.peek().is_some() && !out.is_empty() && !out.ends_with('\n') {
        out.push_str(detect_line_ending(text));
    }
    for ins in pending {
        out.push_str(&ins.text);
    }

    out
}
