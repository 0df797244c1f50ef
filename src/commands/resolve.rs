use colored::Colorize;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use crate::error::{HeadersError, Result};
use crate::options::{verbose, Target};
use crate::utils::{self, download};

/// One entry of the Electron release catalog. Other fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ElectronRelease {
    pub version: String,
    #[serde(default)]
    pub node: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AppManifest {
    #[serde(rename = "devDependencies", default)]
    dev_dependencies: HashMap<String, serde_json::Value>,
}

/// `resources/app/package.json` next to the VS Code executable.
pub fn manifest_path(executable: &Path) -> PathBuf {
    executable
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join("resources")
        .join("app")
        .join("package.json")
}

/// Electron version declared by a VS Code installation.
pub fn electron_from_vscode(executable: &Path) -> Result<String> {
    let path = manifest_path(executable);
    verbose::log(&format!("Reading {}", path.display()));

    let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => HeadersError::ManifestNotFound(path.clone()),
        _ => HeadersError::fs(&path, e),
    })?;

    let manifest: AppManifest = serde_json::from_str(&content).map_err(|e| {
        HeadersError::ManifestParseError {
            path: path.clone(),
            source: e,
        }
    })?;

    manifest
        .dev_dependencies
        .get("electron")
        .and_then(|v| v.as_str())
        .map(|v| v.trim().to_string())
        .ok_or(HeadersError::FieldMissing(path))
}

/// First catalog entry for `electron`, mapped to its Node.js version.
pub fn find_node_version(releases: &[ElectronRelease], electron: &str) -> Result<String> {
    releases
        .iter()
        .find(|r| r.version == electron)
        .and_then(|r| r.node.clone())
        .ok_or_else(|| HeadersError::VersionNotFound(electron.to_string()))
}

pub struct Resolver<'a> {
    client: &'a Client,
    releases_url: &'a str,
}

impl<'a> Resolver<'a> {
    pub fn new(client: &'a Client, releases_url: &'a str) -> Self {
        Self { client, releases_url }
    }

    pub fn node_from_electron(&self, electron: &str) -> Result<String> {
        println!("Fetching Electron release catalog...");
        let releases: Vec<ElectronRelease> = download::fetch_json(self.client, self.releases_url)?;
        verbose::log(&format!("Catalog has {} entries", releases.len()));

        let node = find_node_version(&releases, electron)?;
        println!(
            "Mapped Electron version: {} to Node.js version: {}",
            electron.green(),
            node.green()
        );
        Ok(node)
    }

    /// Resolves `target` to a normalized Node.js version. `runtime` is only
    /// called for [`Target::Runtime`].
    pub fn resolve<F>(&self, target: &Target, runtime: F) -> Result<String>
    where
        F: FnOnce() -> Result<String>,
    {
        let node = match target {
            Target::Node(version) => version.clone(),
            Target::Electron(version) => {
                let electron = utils::normalize_version(version)?;
                self.node_from_electron(&electron)?
            }
            Target::VsCode(executable) => {
                let electron = electron_from_vscode(executable)?;
                println!("VS Code bundles Electron {}", electron.green());
                self.node_from_electron(&electron)?
            }
            Target::Runtime => {
                let version = runtime()?;
                println!("Using local Node.js version {}", version.green());
                version
            }
        };

        utils::normalize_version(&node)
    }
}
