use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{self, Write};
use crate::error::{HeadersError, Result};
use crate::options::verbose;
use crate::utils::DownloadTarget;

pub fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(HeadersError::HttpClient)
}

fn get(client: &Client, url: &str) -> Result<Response> {
    client
        .get(url)
        .send()
        .and_then(Response::error_for_status)
        .map_err(|e| HeadersError::network(url, e))
}

pub fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    verbose::log(&format!("GET {}", url));
    get(client, url)?
        .json()
        .map_err(|e| HeadersError::network(url, e))
}

fn progress_bar(progress: &MultiProgress, total_size: Option<u64>, name: &str) -> ProgressBar {
    let pb = progress.add(ProgressBar::new(total_size.unwrap_or(0)));
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} {msg:12} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-"),
    );
    pb.set_message(name.to_string());
    pb
}

/// Body read failures surface as an `io::Error` wrapping the `reqwest::Error`;
/// anything else came from the destination file.
fn copy_error(target: &DownloadTarget, e: io::Error) -> HeadersError {
    let from_body = e
        .get_ref()
        .map_or(false, |inner| inner.is::<reqwest::Error>());

    if from_body {
        HeadersError::network(&target.url, e)
    } else {
        HeadersError::fs(&target.dest, e)
    }
}

/// Streams the response body into `target.dest`.
pub fn download_file(client: &Client, target: &DownloadTarget, progress: &MultiProgress) -> Result<()> {
    let resp = get(client, &target.url)?;

    let name = target
        .dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let pb = progress_bar(progress, resp.content_length(), &name);

    let mut file = File::create(&target.dest).map_err(|e| HeadersError::fs(&target.dest, e))?;
    let mut reader = pb.wrap_read(resp);

    io::copy(&mut reader, &mut file).map_err(|e| copy_error(target, e))?;
    file.flush().map_err(|e| HeadersError::fs(&target.dest, e))?;
    drop(file);

    pb.finish_with_message(format!("{} done", name));
    verbose::log(&format!("Wrote {}", target.dest.display()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn target() -> DownloadTarget {
        DownloadTarget {
            url: "http://127.0.0.1:9/node.lib".to_string(),
            dest: PathBuf::from("out/node.lib"),
        }
    }

    #[test]
    fn body_errors_are_network_errors() {
        let client = http_client().unwrap();
        let reqwest_err = client.get("http://127.0.0.1:9/").send().unwrap_err();
        let err = copy_error(&target(), io::Error::new(io::ErrorKind::Other, reqwest_err));

        assert!(matches!(err, HeadersError::NetworkError { ref url, .. } if url.ends_with("node.lib")));
    }

    #[test]
    fn write_errors_are_filesystem_errors() {
        let err = copy_error(&target(), io::Error::new(io::ErrorKind::Other, "disk full"));

        assert!(matches!(err, HeadersError::FilesystemError { ref path, .. } if path.ends_with("node.lib")));
    }
}
