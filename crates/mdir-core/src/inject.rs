//! In-place injection of new block content into an existing file.
//!
//! The span to replace is located purely textually: the first incoming
//! line that matches an existing line opens it, the last incoming line
//! that matches a later existing line closes it. The matched span is
//! commented out, never deleted, and the incoming content is inserted
//! immediately before it. Anything short of an unambiguous span falls
//! back to the caller's conflict policy.

use crate::conflict::comment_out;

/// Attempts the merge. `None` means no unambiguous span was found.
pub fn merge(existing: &str, incoming: &str, comment: &str) -> Option<String> {
    let existing_lines: Vec<&str> = existing.lines().collect();
    let incoming_lines: Vec<&str> = incoming.lines().collect();

    let (start, end) = find_span(&existing_lines, &incoming_lines)?;

    let displaced = existing_lines[start..=end].join("\n");
    let mut merged: Vec<String> = Vec::with_capacity(existing_lines.len() + incoming_lines.len());
    merged.extend(existing_lines[..start].iter().map(|l| l.to_string()));
    merged.extend(incoming_lines.iter().map(|l| l.to_string()));
    merged.push(comment_out(&displaced, comment));
    merged.extend(existing_lines[end + 1..].iter().map(|l| l.to_string()));

    Some(merged.join("\n"))
}

/// Start: first existing line matching the first matchable incoming
/// line. End: first existing line after start matching the last
/// matchable incoming line. Comparison ignores surrounding whitespace;
/// blank lines never anchor a span.
fn find_span(existing: &[&str], incoming: &[&str]) -> Option<(usize, usize)> {
    let start = incoming.iter().find_map(|line| {
        let needle = line.trim();
        if needle.is_empty() {
            return None;
        }
        existing.iter().position(|e| e.trim() == needle)
    })?;

    let end = incoming.iter().rev().find_map(|line| {
        let needle = line.trim();
        if needle.is_empty() {
            return None;
        }
        existing[start + 1..]
            .iter()
            .position(|e| e.trim() == needle)
            .map(|offset| start + 1 + offset)
    })?;

    (start < end).then_some((start, end))
}
