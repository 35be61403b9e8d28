//! Run reports.
//!
//! Every per-block and per-file outcome accumulates here instead of
//! aborting the run. The summary makes each destructive-looking action
//! traceable: a reader can find where displaced content went.

use serde::{Deserialize, Serialize};

/// Report from a build or assemble run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Paths written (build) or files included (assemble).
    pub written: Vec<String>,
    /// Skipped blocks/files with reasons.
    pub skipped: Vec<Skip>,
    /// Per-path failures; the run continued past each one.
    pub failed: Vec<Failure>,
    /// Backup, rename, and injection actions taken.
    pub actions: Vec<String>,
}

/// One skipped block or file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skip {
    pub target: String,
    pub reason: String,
}

/// One failed path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Failure {
    pub target: String,
    pub error: String,
}

impl RunReport {
    /// Full success: nothing failed. Skips are expected behavior.
    pub fn success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn skip(&mut self, target: impl Into<String>, reason: impl Into<String>) {
        let target = target.into();
        let reason = reason.into();
        tracing::debug!(%target, %reason, "skipped");
        self.skipped.push(Skip { target, reason });
    }

    pub fn fail(&mut self, target: impl Into<String>, error: impl std::fmt::Display) {
        let target = target.into();
        let error = error.to_string();
        tracing::warn!(%target, %error, "failed, continuing");
        self.failed.push(Failure { target, error });
    }

    pub fn action(&mut self, action: impl Into<String>) {
        let action = action.into();
        tracing::info!(%action);
        self.actions.push(action);
    }
}
