use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeadersError {
    #[error("Missing arguments: an output directory is required")]
    MissingArguments,

    #[error("Invalid version format: {0} (expected X.Y.Z)")]
    InvalidVersionFormat(String),

    #[error("VS Code manifest not found at {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("Failed to parse VS Code manifest {}", .path.display())]
    ManifestParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No electron entry in devDependencies of {}", .0.display())]
    FieldMissing(PathBuf),

    #[error("Electron {0} was not found in the release catalog")]
    VersionNotFound(String),

    #[error("Failed to fetch {url}")]
    NetworkError {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Filesystem error on {}", .path.display())]
    FilesystemError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to extract {}: {reason}", .archive.display())]
    ExtractionError { archive: PathBuf, reason: String },

    #[error("Could not determine the local Node.js version: {0}")]
    RuntimeVersion(String),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Invalid config file {}: {reason}", .path.display())]
    ConfigError { path: PathBuf, reason: String },
}

impl HeadersError {
    pub fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HeadersError::FilesystemError {
            path: path.into(),
            source,
        }
    }

    pub fn network(url: &str, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        HeadersError::NetworkError {
            url: url.to_string(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HeadersError>;
