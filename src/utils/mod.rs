pub mod download;
pub mod extract;

use semver::Version;
use std::path::{Path, PathBuf};
use std::process::Command;
use crate::error::{HeadersError, Result};
use crate::options::verbose;

/// Strips one leading `v` and checks for a plain `X.Y.Z` version.
pub fn normalize_version(input: &str) -> Result<String> {
    let trimmed = input.trim();
    let candidate = trimmed.strip_prefix('v').unwrap_or(trimmed);

    match Version::parse(candidate) {
        Ok(version) if version.pre.is_empty() && version.build.is_empty() => {
            Ok(version.to_string())
        }
        _ => Err(HeadersError::InvalidVersionFormat(input.to_string())),
    }
}

/// Version of the `node` executable found on PATH.
pub fn runtime_node_version() -> Result<String> {
    let node_cmd = if cfg!(target_os = "windows") {
        "node.exe"
    } else {
        "node"
    };

    verbose::log(&format!("Querying {} --version", node_cmd));

    let output = Command::new(node_cmd)
        .arg("--version")
        .output()
        .map_err(|e| HeadersError::RuntimeVersion(format!("failed to run {}: {}", node_cmd, e)))?;

    if !output.status.success() {
        return Err(HeadersError::RuntimeVersion(format!(
            "{} --version exited with {}",
            node_cmd, output.status
        )));
    }

    normalize_version(&String::from_utf8_lossy(&output.stdout))
}

/// A single file to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub url: String,
    pub dest: PathBuf,
}

/// Headers archive and Windows x64 import library for one Node.js release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub headers: DownloadTarget,
    pub library: DownloadTarget,
}

pub fn get_artifacts(mirror: &str, version: &str, out_dir: &Path) -> Artifacts {
    let base = format!("{}/v{}", mirror.trim_end_matches('/'), version);

    Artifacts {
        headers: DownloadTarget {
            url: format!("{}/node-v{}-headers.tar.gz", base, version),
            dest: out_dir.join("headers.tar.gz"),
        },
        library: DownloadTarget {
            url: format!("{}/win-x64/node.lib", base),
            dest: out_dir.join("node.lib"),
        },
    }
}
