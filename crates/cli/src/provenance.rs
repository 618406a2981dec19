use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Metadata used to generate a provenance sidecar.
pub struct Payload {
    pub params: Value,
    /// Every file produced by the same run, the artifact itself included.
    pub outputs: Vec<PathBuf>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            outputs: Vec::new(),
        }
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.outputs.push(path.into());
        self
    }
}

/// Write `<artifact stem>.provenance.json` with the git commit, library version,
/// callsite, params, and outputs.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    if let Some(parent) = provenance_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let mut outputs: Vec<String> = vec![artifact.to_string_lossy().into_owned()];
    outputs.extend(
        payload
            .outputs
            .iter()
            .filter(|p| p.as_path() != artifact)
            .map(|p| p.to_string_lossy().into_owned()),
    );

    let callsite = Location::caller();
    let doc = json!({
        "code_rev": current_git_rev(),
        "stripfold_version": stripfold::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "params": payload.params,
        "outputs": outputs
    });
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    tracing::debug!(path = %provenance_path.display(), "provenance_written");
    Ok(provenance_path)
}

/// One sidecar per strip: the figure and table of a run share a stem, so both
/// resolve to `<stem>.provenance.json`.
fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("stripfold");
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

fn non_empty(rev: &str) -> Option<String> {
    let rev = rev.trim();
    (!rev.is_empty()).then(|| rev.to_string())
}

fn git_head() -> Option<String> {
    let output = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    non_empty(std::str::from_utf8(&output.stdout).ok()?)
}

/// `GIT_COMMIT` baked in at build time, else `GIT_COMMIT` at run time, else the
/// checkout's `HEAD`, else `"unknown"`.
pub fn current_git_rev() -> String {
    option_env!("GIT_COMMIT")
        .and_then(non_empty)
        .or_else(|| std::env::var("GIT_COMMIT").ok().as_deref().and_then(non_empty))
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_string())
}
