//! Block-ignore rules.
//!
//! `blocks_ignored` holds rule tokens parsed once at config load into a
//! closed [`RuleSet`]; dispatch is a plain struct of flags, so every
//! combination is exhaustively testable. Unknown tokens are a fatal
//! configuration error.

use mdir_fence::Block;

use crate::{Error, Result};

/// Parsed ignore rules. A block matching any active rule is skipped and
/// recorded, never silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    /// Skip blocks with fewer than this many non-blank lines.
    pub min_lines: Option<usize>,
    /// Skip blocks with no resolvable target path.
    pub nameless: bool,
    /// Skip blocks whose resolved name has no extension.
    pub without_ext: bool,
    /// Skip blocks mentioning "readme".
    pub readme: bool,
    /// Skip blocks mentioning "properties".
    pub properties: bool,
    /// Skip blocks whose target already exists.
    pub conflicts: bool,
    /// Skip blocks whose target does not exist yet.
    pub new: bool,
}

impl RuleSet {
    /// Parse rule tokens. `none` is the explicit empty set and must
    /// appear alone.
    pub fn parse(tokens: &[String]) -> Result<Self> {
        if tokens.iter().any(|t| t == "none") {
            if tokens.len() != 1 {
                return Err(Error::ConfigInvalid {
                    message: "'none' cannot be combined with other block rules".to_string(),
                });
            }
            return Ok(Self::default());
        }

        let mut rules = Self::default();
        for token in tokens {
            match token.as_str() {
                "nameless" => rules.nameless = true,
                "without_ext" => rules.without_ext = true,
                "readme" => rules.readme = true,
                "properties" => rules.properties = true,
                "conflicts" => rules.conflicts = true,
                "new" => rules.new = true,
                other => match other.strip_prefix("lessthan_") {
                    Some(n) => {
                        let n: usize = n.parse().map_err(|_| Error::ConfigInvalid {
                            message: format!("bad block rule: {other}"),
                        })?;
                        rules.min_lines = Some(n);
                    }
                    None => {
                        return Err(Error::ConfigInvalid {
                            message: format!("unknown block rule: {other}"),
                        });
                    }
                },
            }
        }
        Ok(rules)
    }

    /// Content-level rules, checked before any path is resolved.
    /// Returns the reason a block is ignored, if any.
    pub fn content_reason(&self, block: &Block) -> Option<String> {
        if let Some(min) = self.min_lines
            && block.significant_lines() < min
        {
            return Some(format!("fewer than {min} lines"));
        }
        let body = block.body.join("\n").to_ascii_lowercase();
        if self.readme && body.contains("readme") {
            return Some("readme content".to_string());
        }
        if self.properties && body.contains("properties") {
            return Some("properties content".to_string());
        }
        None
    }

    /// Name-level rule: resolved path without an extension.
    pub fn rejects_extensionless(&self, path: &str) -> bool {
        self.without_ext && !has_extension(path)
    }
}

fn has_extension(path: &str) -> bool {
    let name = path.rsplit('/').next().unwrap_or(path);
    matches!(name.rfind('.'), Some(idx) if idx > 0 && idx + 1 < name.len())
}
