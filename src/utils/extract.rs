use flate2::read::GzDecoder;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::process::Command;
use crate::error::{HeadersError, Result};
use crate::options::{verbose, ExtractorKind};

/// Unpacks a `.tar.gz` into `extract_dir`, dropping the archive's top-level directory.
pub fn extract_archive(kind: ExtractorKind, archive_path: &Path, extract_dir: &Path) -> Result<()> {
    match kind {
        ExtractorKind::Tar => extract_with_tar(archive_path, extract_dir),
        ExtractorKind::Builtin => extract_tar_gz(archive_path, extract_dir),
    }
}

fn extraction_error(archive_path: &Path, reason: impl Into<String>) -> HeadersError {
    HeadersError::ExtractionError {
        archive: archive_path.to_path_buf(),
        reason: reason.into(),
    }
}

fn extract_with_tar(archive_path: &Path, extract_dir: &Path) -> Result<()> {
    verbose::log(&format!(
        "Running tar -xf {} -C {} --strip-components 1",
        archive_path.display(),
        extract_dir.display()
    ));

    let output = Command::new("tar")
        .arg("-xf")
        .arg(archive_path)
        .arg("-C")
        .arg(extract_dir)
        .args(["--strip-components", "1"])
        .output()
        .map_err(|e| extraction_error(archive_path, format!("failed to run tar: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(extraction_error(
            archive_path,
            format!("tar exited with {}: {}", output.status, stderr.trim()),
        ));
    }

    Ok(())
}

/// Path with the first component removed. `None` for the top-level entry itself
/// and for anything that could land outside the extraction directory.
fn strip_first_component(path: &Path) -> Option<PathBuf> {
    let mut components = path.components();
    components.next()?;

    let mut stripped = PathBuf::new();
    for component in components {
        match component {
            Component::Normal(part) => stripped.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }

    if stripped.as_os_str().is_empty() {
        None
    } else {
        Some(stripped)
    }
}

fn extract_tar_gz(archive_path: &Path, extract_dir: &Path) -> Result<()> {
    let file = fs::File::open(archive_path).map_err(|e| HeadersError::fs(archive_path, e))?;
    let decompressed = GzDecoder::new(file);
    let mut archive = tar::Archive::new(decompressed);

    let entries = archive
        .entries()
        .map_err(|e| extraction_error(archive_path, e.to_string()))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| extraction_error(archive_path, e.to_string()))?;
        let path = entry
            .path()
            .map_err(|e| extraction_error(archive_path, e.to_string()))?
            .into_owned();

        let Some(relative) = strip_first_component(&path) else {
            verbose::log(&format!("Skipping {}", path.display()));
            continue;
        };

        let outpath = extract_dir.join(relative);
        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent).map_err(|e| HeadersError::fs(parent, e))?;
        }
        entry
            .unpack(&outpath)
            .map_err(|e| extraction_error(archive_path, format!("{}: {}", outpath.display(), e)))?;
    }

    Ok(())
}
