use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What a command was asked to do: its name, parameters and input files.
pub struct Payload {
    pub command: &'static str,
    pub params: Value,
    pub inputs: Vec<PathBuf>,
}

impl Payload {
    pub fn new<P: Serialize>(command: &'static str, params: &P) -> Result<Self> {
        Ok(Self {
            command,
            params: serde_json::to_value(params).context("serializing provenance params")?,
            inputs: Vec::new(),
        })
    }

    pub fn with_input(mut self, path: &Path) -> Self {
        self.inputs.push(path.to_path_buf());
        self
    }
}

/// Provenance block shared by sidecars and `report`.
pub fn header() -> Value {
    json!({
        "code_rev": current_git_rev(),
        "mixdesign_version": mixdesign::VERSION,
        "cli_version": env!("CARGO_PKG_VERSION"),
    })
}

/// Write `<artifact stem>.provenance.json` next to `artifact`.
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

    let callsite = Location::caller();
    let mut doc = header();
    doc["callsite"] = json!({ "file": callsite.file(), "line": callsite.line() });
    doc["command"] = json!(payload.command);
    doc["params"] = payload.params;
    doc["inputs"] = payload
        .inputs
        .iter()
        .map(|p| Value::from(p.to_string_lossy()))
        .collect();
    doc["outputs"] = json!([artifact.to_string_lossy()]);
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    tracing::debug!(path = %provenance_path.display(), "provenance written");
    Ok(provenance_path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[derive(Serialize)]
    struct Params {
        variant: &'static str,
        order: usize,
    }

    #[test]
    fn provenance_path_rewrites_extension() {
        let base = Path::new("/tmp/output/design.csv");
        assert_eq!(
            provenance_path(base),
            Path::new("/tmp/output/design.provenance.json")
        );
    }

    #[test]
    fn sidecar_records_params_and_files() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("lattice.csv");
        let input = dir.path().join("hull.csv");
        fs::write(&artifact, "Comp1,Comp2,Comp3,Score\n").unwrap();
        let payload = Payload::new(
            "design",
            &Params {
                variant: "Scheffé Network",
                order: 3,
            },
        )
        .unwrap()
        .with_input(&input);
        let prov_path = write_sidecar(&artifact, payload).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["command"], "design");
        assert_eq!(parsed["params"]["order"], 3);
        assert_eq!(parsed["inputs"][0], input.to_string_lossy().as_ref());
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["mixdesign_version"], mixdesign::VERSION);
    }
}
