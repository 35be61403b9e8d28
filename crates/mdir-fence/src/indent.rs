//! Indentation algebra for fences crossing the manuscript/file boundary.
//!
//! When a depth-0 block is written to a file, every complete fence span
//! inside its body loses one indent unit, so a depth-1 fence becomes a
//! top-level fence inside the file and a depth-K fence keeps K-1 units.
//! Assembly applies the inverse. Each line is shifted exactly once per
//! transform, no matter how deeply the fences nest: a span's shift covers
//! its whole body, nested delimiters included.

use crate::block::{INDENT_WIDTH, fence_line};

/// Subtracts one indent unit from every line of every complete top-level
/// fence span in `lines`. Lines outside fence spans, and unterminated
/// fences, pass through untouched.
pub fn shift_left(lines: &[String]) -> Vec<String> {
    shift(lines, dedent_line)
}

/// Adds one indent unit to every line of every complete top-level fence
/// span in `lines`. Empty lines are left empty so the transform never
/// manufactures trailing whitespace.
pub fn shift_right(lines: &[String]) -> Vec<String> {
    shift(lines, indent_line)
}

fn shift(lines: &[String], apply: fn(&str) -> String) -> Vec<String> {
    let mut out: Vec<String> = lines.to_vec();
    for (start, end) in fence_spans(lines) {
        for line in &mut out[start..=end] {
            *line = apply(line);
        }
    }
    out
}

/// Top-level complete fence spans as inclusive (open, close) line ranges.
/// Nested delimiters are interior to their span and never start one here.
fn fence_spans(lines: &[String]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if let Some((width, _)) = fence_line(&lines[i])
            && let Some(close) = find_close(lines, i + 1, width)
        {
            spans.push((i, close));
            i = close + 1;
            continue;
        }
        i += 1;
    }
    spans
}

fn find_close(lines: &[String], from: usize, width: usize) -> Option<usize> {
    for (offset, line) in lines[from..].iter().enumerate() {
        if let Some((w, _)) = fence_line(line) {
            if w == width {
                return Some(from + offset);
            }
            if w < width {
                return None;
            }
        }
    }
    None
}

fn dedent_line(line: &str) -> String {
    let width = line.len() - line.trim_start_matches(' ').len();
    line[width.min(INDENT_WIDTH)..].to_string()
}

fn indent_line(line: &str) -> String {
    if line.trim().is_empty() {
        String::new()
    } else {
        format!("{}{}", " ".repeat(INDENT_WIDTH), line)
    }
}
