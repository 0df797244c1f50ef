use colored::Colorize;
use indicatif::MultiProgress;
use reqwest::blocking::Client;
use std::fs;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use crate::error::{HeadersError, Result};
use crate::options::{verbose, ExtractorKind};
use crate::utils::{self, download, extract};

/// Downloads the headers archive and `node.lib` for `version` into `out_dir`
/// and unpacks the headers there.
///
/// Both transfers run at the same time. Neither is cancelled when the other
/// fails; the first failure to arrive is returned once both have finished.
pub fn fetch_artifacts(
    client: &Client,
    mirror: &str,
    extractor: ExtractorKind,
    version: &str,
    out_dir: &Path,
) -> Result<()> {
    fs::create_dir_all(out_dir).map_err(|e| HeadersError::fs(out_dir, e))?;

    let artifacts = utils::get_artifacts(mirror, version, out_dir);
    let progress = MultiProgress::new();

    println!("Downloading {} to {}", artifacts.headers.url, artifacts.headers.dest.display());
    println!("Downloading {} to {}", artifacts.library.url, artifacts.library.dest.display());

    let (tx, rx) = mpsc::channel();

    thread::scope(|s| {
        let headers_tx = tx.clone();
        let headers = &artifacts.headers;
        let progress = &progress;
        s.spawn(move || {
            let result = download::download_file(client, headers, progress).and_then(|()| {
                verbose::log(&format!("Extracting {}", headers.dest.display()));
                extract::extract_archive(extractor, &headers.dest, out_dir)
            });
            let _ = headers_tx.send(("headers", result));
        });

        let library = &artifacts.library;
        s.spawn(move || {
            let result = download::download_file(client, library, progress);
            let _ = tx.send(("node.lib", result));
        });
    });

    let mut first_error = None;
    for (name, result) in rx {
        match result {
            Ok(()) => verbose::log(&format!("{} finished", name)),
            Err(e) if first_error.is_none() => first_error = Some(e),
            Err(e) => verbose::log(&format!("{} also failed: {}", name, e)),
        }
    }

    if let Some(e) = first_error {
        return Err(e);
    }

    println!(
        "Headers and node.lib for Node.js {} downloaded to {}",
        version.green(),
        out_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::TestServer;
    use crate::utils::extract::tests::headers_archive;

    const HEADERS: &str = "/v18.17.0/node-v18.17.0-headers.tar.gz";
    const LIBRARY: &str = "/v18.17.0/win-x64/node.lib";

    fn fetch_with(server: &TestServer, extractor: ExtractorKind, out_dir: &Path) -> Result<()> {
        let client = download::http_client().unwrap();
        fetch_artifacts(&client, &server.url(""), extractor, "18.17.0", out_dir)
    }

    fn fetch(server: &TestServer, out_dir: &Path) -> Result<()> {
        fetch_with(server, ExtractorKind::Builtin, out_dir)
    }

    #[test]
    fn downloads_and_extracts() {
        let server = TestServer::start(vec![
            (HEADERS, 200, headers_archive("18.17.0")),
            (LIBRARY, 200, b"lib contents".to_vec()),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out");

        fetch(&server, &out).unwrap();

        assert_eq!(fs::read(out.join("node.lib")).unwrap(), b"lib contents");
        assert!(out.join("include/node/node.h").is_file());
        assert!(out.join("headers.tar.gz").is_file());
        assert!(!out.join("node-v18.17.0").exists());
    }

    #[test]
    fn downloads_and_extracts_with_system_tar() {
        let server = TestServer::start(vec![
            (HEADERS, 200, headers_archive("18.17.0")),
            (LIBRARY, 200, b"lib contents".to_vec()),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");

        fetch_with(&server, ExtractorKind::Tar, &out).unwrap();

        assert_eq!(fs::read(out.join("node.lib")).unwrap(), b"lib contents");
        assert!(out.join("include/node/node.h").is_file());
        assert!(out.join("include/node/node_api.h").is_file());
        assert!(!out.join("node-v18.17.0").exists());
    }

    #[test]
    fn existing_output_directory_is_reused() {
        let server = TestServer::start(vec![
            (HEADERS, 200, headers_archive("18.17.0")),
            (LIBRARY, 200, b"lib contents".to_vec()),
        ]);
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("keep.txt"), "existing").unwrap();

        fetch(&server, dir.path()).unwrap();
        fetch(&server, dir.path()).unwrap();

        assert!(dir.path().join("keep.txt").is_file());
        assert!(dir.path().join("include/node/node_api.h").is_file());
    }

    #[test]
    fn headers_failure_keeps_library() {
        let server = TestServer::start(vec![(LIBRARY, 200, b"lib contents".to_vec())]);
        let dir = tempfile::tempdir().unwrap();

        let err = fetch(&server, dir.path()).unwrap_err();

        assert!(matches!(err, HeadersError::NetworkError { ref url, .. } if url.ends_with(HEADERS)));
        assert_eq!(fs::read(dir.path().join("node.lib")).unwrap(), b"lib contents");
    }

    #[test]
    fn library_failure_fails_the_whole_fetch() {
        let server = TestServer::start(vec![(HEADERS, 200, headers_archive("18.17.0"))]);
        let dir = tempfile::tempdir().unwrap();

        let err = fetch(&server, dir.path()).unwrap_err();

        assert!(matches!(err, HeadersError::NetworkError { ref url, .. } if url.ends_with(LIBRARY)));
        assert!(dir.path().join("include/node/node.h").is_file());
    }

    #[test]
    fn bad_archive_is_an_extraction_error() {
        let server = TestServer::start(vec![
            (HEADERS, 200, b"definitely not gzip".to_vec()),
            (LIBRARY, 200, b"lib contents".to_vec()),
        ]);
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            fetch(&server, dir.path()),
            Err(HeadersError::ExtractionError { .. })
        ));
    }

    #[test]
    fn output_path_that_is_a_file_fails() {
        let server = TestServer::start(vec![]);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("file");
        fs::write(&out, "x").unwrap();

        assert!(matches!(
            fetch(&server, &out),
            Err(HeadersError::FilesystemError { .. })
        ));
    }
}
