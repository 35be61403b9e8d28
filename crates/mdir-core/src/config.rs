//! Run configuration: loading, defaults, and validation.
//!
//! The config file is TOML. Every field has a default matching the
//! shipped behavior, so an absent file or an empty table is a valid
//! configuration. Validation runs once at load time; a run never begins
//! with an inconsistent configuration.

use serde::{Deserialize, Serialize};

use mdir_fence::NamingConvention;
use mdir_fs::{FilterConfig, NormalizedPath, io};

use crate::conflict::ConflictPolicy;
use crate::rules::RuleSet;
use crate::{Error, Result};

/// Configuration snapshot for one build or assemble run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where each block's target path is declared. One convention per
    /// run; blocks are never probed against the others.
    pub file_naming_convention: NamingConvention,
    /// Block-ignore rule tokens, e.g. `lessthan_3`, `nameless`.
    pub blocks_ignored: Vec<String>,
    /// What to do when a build target already holds content.
    pub handle_file_conflicts: ConflictPolicy,
    /// Try an in-place merge before falling back to the conflict policy.
    pub attempt_injection: bool,
    /// Prepend the cosmetic directory tree and filter snapshot when
    /// assembling.
    pub output_directory_tree: bool,
    /// File/directory/extension admission rules.
    #[serde(flatten)]
    pub filter: FilterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_naming_convention: NamingConvention::OnFence,
            blocks_ignored: [
                "lessthan_3",
                "nameless",
                "readme",
                "properties",
                "without_ext",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            handle_file_conflicts: ConflictPolicy::PrependAndComment,
            attempt_injection: false,
            output_directory_tree: true,
            filter: FilterConfig::default(),
        }
    }
}

impl Config {
    /// Load and validate a configuration file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let content = io::read_text(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_native(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the ignore-rule tokens, failing on anything unknown.
    pub fn rule_set(&self) -> Result<RuleSet> {
        RuleSet::parse(&self.blocks_ignored)
    }

    /// Full startup validation. Fatal on failure; nothing has touched
    /// the filesystem yet.
    pub fn validate(&self) -> Result<()> {
        self.rule_set().map(|_| ())
    }
}
