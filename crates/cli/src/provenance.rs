//! Provenance sidecars: every table the CLI writes gets a
//! `<stem>.provenance.json` next to it recording the command, its params,
//! the code revision and the library version.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced an output table.
pub struct Provenance {
    command: &'static str,
    params: Value,
    tags: Vec<String>,
}

impl Provenance {
    pub fn new(command: &'static str, params: Value) -> Self {
        Self {
            command,
            params,
            tags: Vec::new(),
        }
    }

    /// Attach the global `--tag` label, if any.
    pub fn tagged(mut self, tag: Option<String>) -> Self {
        self.tags.extend(tag);
        self
    }

    fn document(&self, artifact: &Path, callsite: &Location<'_>) -> Value {
        json!({
            "command": self.command,
            "code_rev": code_rev(),
            "geom_simd": geom_simd::VERSION,
            "callsite": format!("{}:{}", callsite.file(), callsite.line()),
            "params": self.params,
            "tags": self.tags,
            "outputs": [artifact.to_string_lossy()],
        })
    }

    /// Write the sidecar for `artifact`; returns the sidecar path.
    #[track_caller]
    pub fn write_next_to(self, artifact: &Path) -> Result<PathBuf> {
        let doc = self.document(artifact, Location::caller());
        let path = sidecar_path(artifact);
        fs::write(&path, serde_json::to_vec_pretty(&doc)?)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(sidecar = %path.display(), "provenance written");
        Ok(path)
    }
}

/// `dir/name.ext` → `dir/name.provenance.json`.
pub fn sidecar_path(artifact: &Path) -> PathBuf {
    if artifact.file_name().is_none() {
        return artifact.join("artifact.provenance.json");
    }
    artifact.with_extension("provenance.json")
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`.
pub fn code_rev() -> String {
    [
        option_env!("GIT_COMMIT").map(str::to_owned),
        std::env::var("GIT_COMMIT").ok(),
    ]
    .into_iter()
    .flatten()
    .find(|rev| !rev.is_empty())
    .or_else(git_head)
    .unwrap_or_else(|| "unknown".to_owned())
}

fn git_head() -> Option<String> {
    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).trim().to_owned())
}
