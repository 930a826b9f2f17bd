//! Machine-readable outcome of a `verify` or `convert` run.
//!
//! Printed by the CLI when `--json` is passed. One report describes one input
//! file; the message is the same text the CLI prints in plain mode.

use crate::error::{BadgeError, FailureKind};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outcome of processing a single badge.
#[derive(Serialize, Debug, Clone)]
pub struct Report {
    /// The input file the report is about.
    pub path: PathBuf,

    /// Whether the operation succeeded.
    pub ok: bool,

    /// Failure discriminant, absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,

    /// Human-readable success or failure message.
    pub message: String,
}

impl Report {
    pub fn from_outcome(path: &Path, outcome: &Result<String, BadgeError>) -> Self {
        match outcome {
            Ok(message) => Self {
                path: path.to_path_buf(),
                ok: true,
                kind: None,
                message: message.clone(),
            },
            Err(err) => Self {
                path: path.to_path_buf(),
                ok: false,
                kind: Some(err.kind()),
                message: err.to_string(),
            },
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
