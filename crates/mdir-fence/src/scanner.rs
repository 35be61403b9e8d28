//! Recursive fence scanner.
//!
//! Tokenizes manuscript text into an ordered sequence of [`Segment`]s.
//! An opening delimiter pairs with the nearest subsequent delimiter at
//! the *same* leading-whitespace width; delimiters at greater widths in
//! between belong to nested blocks and never terminate the outer span.
//! A fence with no same-width close before the end of input, or before a
//! shallower delimiter, is not an error: its opening line onward degrades
//! to plain text.

use crate::block::{Block, INDENT_WIDTH, Segment, fence_line};

/// Scans manuscript text into segments. Pure and deterministic.
pub fn scan(text: &str) -> Vec<Segment> {
    let lines: Vec<&str> = text.lines().collect();
    scan_lines(&lines)
}

/// Convenience accessor: only the blocks of a scan, in document order.
pub fn blocks(text: &str) -> Vec<Block> {
    scan(text)
        .into_iter()
        .filter_map(|s| match s {
            Segment::Block(b) => Some(b),
            Segment::Text(_) => None,
        })
        .collect()
}

fn scan_lines(lines: &[&str]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text: Vec<String> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if let Some((width, tag)) = fence_line(lines[i])
            && let Some(close) = find_close(lines, i + 1, width)
        {
            if !text.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut text)));
            }
            let body: Vec<String> = lines[i + 1..close].iter().map(|l| l.to_string()).collect();
            let children = child_blocks(&body);
            tracing::trace!(
                depth = width / INDENT_WIDTH,
                tag = tag.as_deref().unwrap_or(""),
                lines = body.len(),
                "scanned block"
            );
            segments.push(Segment::Block(Block {
                tag,
                depth: width / INDENT_WIDTH,
                body,
                children,
            }));
            i = close + 1;
            continue;
        }
        text.push(lines[i].to_string());
        i += 1;
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    segments
}

/// Finds the closing delimiter for a fence opened at `width`.
///
/// Deeper delimiters are nested content and are skipped; a shallower
/// delimiter means the span is unterminated.
fn find_close(lines: &[&str], from: usize, width: usize) -> Option<usize> {
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

fn child_blocks(body: &[String]) -> Vec<Block> {
    let refs: Vec<&str> = body.iter().map(|l| l.as_str()).collect();
    scan_lines(&refs)
        .into_iter()
        .filter_map(|s| match s {
            Segment::Block(b) => Some(b),
            Segment::Text(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scan_no_fences_is_one_text_run() {
        let segments = scan("alpha\nbeta");
        assert_eq!(
            segments,
            vec![Segment::Text(vec!["alpha".into(), "beta".into()])]
        );
    }

    #[test]
    fn scan_single_block() {
        let segments = scan("```main.py\nprint(1)\n```\n");
        assert_eq!(segments.len(), 1);
        let Segment::Block(block) = &segments[0] else {
            panic!("expected block");
        };
        assert_eq!(block.tag.as_deref(), Some("main.py"));
        assert_eq!(block.depth, 0);
        assert_eq!(block.body, vec!["print(1)".to_string()]);
        assert!(block.children.is_empty());
    }

    #[test]
    fn scan_preserves_segment_order() {
        let segments = scan("before\n```a.txt\nx\n```\nafter");
        assert_eq!(segments.len(), 3);
        assert!(matches!(&segments[0], Segment::Text(t) if t == &vec!["before".to_string()]));
        assert!(matches!(&segments[1], Segment::Block(_)));
        assert!(matches!(&segments[2], Segment::Text(t) if t == &vec!["after".to_string()]));
    }

    #[test]
    fn nested_fence_does_not_close_outer() {
        let text = "```a.md\ntop\n    ```b.md\ninner\n    ```\nbottom\n```\n";
        let segments = scan(text);
        assert_eq!(segments.len(), 1);
        let Segment::Block(outer) = &segments[0] else {
            panic!("expected block");
        };
        assert_eq!(outer.body.len(), 5);
        assert_eq!(outer.children.len(), 1);
        assert_eq!(outer.children[0].tag.as_deref(), Some("b.md"));
        assert_eq!(outer.children[0].depth, 1);
        assert_eq!(outer.children[0].body, vec!["inner".to_string()]);
    }

    #[test]
    fn child_depth_is_parent_plus_one() {
        let text = "```a.md\n    ```b.md\n        ```c.md\n        x\n        ```\n    ```\n```\n";
        let blocks = blocks(text);
        assert_eq!(blocks.len(), 1);
        let a = &blocks[0];
        assert_eq!(a.depth, 0);
        assert_eq!(a.children[0].depth, 1);
        assert_eq!(a.children[0].children[0].depth, 2);
    }

    #[test]
    fn unterminated_fence_degrades_to_text() {
        let segments = scan("```a.py\nno close");
        assert_eq!(
            segments,
            vec![Segment::Text(vec![
                "```a.py".to_string(),
                "no close".to_string()
            ])]
        );
    }

    #[test]
    fn shallower_close_leaves_inner_unterminated() {
        // The indented fence never closes at its own width, so it is
        // literal text inside the outer block.
        let text = "```a.md\n    ```b.md\nx\n```\n";
        let segments = scan(text);
        assert_eq!(segments.len(), 1);
        let Segment::Block(outer) = &segments[0] else {
            panic!("expected block");
        };
        assert_eq!(outer.tag.as_deref(), Some("a.md"));
        assert_eq!(outer.body, vec!["    ```b.md".to_string(), "x".to_string()]);
        assert!(outer.children.is_empty());
    }

    #[test]
    fn empty_body_is_preserved_as_block() {
        let segments = scan("```a.cfg\n```\n");
        assert_eq!(segments.len(), 1);
        let Segment::Block(block) = &segments[0] else {
            panic!("expected block");
        };
        assert!(block.body.is_empty());
        assert!(block.is_empty());
    }

    #[test]
    fn consecutive_blocks_pair_independently() {
        let blocks = blocks("```a.py\n1\n```\n```b.py\n2\n```\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].tag.as_deref(), Some("a.py"));
        assert_eq!(blocks[1].tag.as_deref(), Some("b.py"));
    }

    #[test]
    fn close_with_tag_still_closes() {
        // The nearest same-width delimiter terminates the span even when
        // it carries a tag of its own.
        let blocks = blocks("```a.py\ncode\n```py\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].body, vec!["code".to_string()]);
    }
}
