//! Document root lookups
//!
//! A request path is stripped of its leading `/` and joined onto the root
//! with ordinary path-joining rules. Nothing is canonicalized, so `..`
//! segments resolve the way the filesystem resolves them.

use crate::http::mime::{self, TEXT_PLAIN};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Separator placed between directory entry names in a listing.
const LISTING_SEPARATOR: &str = "\r\n";

/// What a request path resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// A regular file with its exact contents and guessed media type
    File { body: Vec<u8>, media_type: String },
    /// A directory with its entry names in enumeration order
    Directory { entries: Vec<String> },
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("cannot determine media type of {}", .0.display())]
    UnknownMediaType(PathBuf),

    #[error("directory entry {} is not valid UTF-8", .0.display())]
    NonUtf8EntryName(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Resource {
    pub fn media_type(&self) -> &str {
        match self {
            Resource::File { media_type, .. } => media_type,
            Resource::Directory { .. } => TEXT_PLAIN,
        }
    }

    /// Consumes the resource, returning the response body and media type.
    pub fn into_content(self) -> (Vec<u8>, String) {
        match self {
            Resource::File { body, media_type } => (body, media_type),
            Resource::Directory { entries } => (
                entries.join(LISTING_SEPARATOR).into_bytes(),
                TEXT_PLAIN.to_string(),
            ),
        }
    }
}

/// Resolves request paths against a fixed document root
#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
}

impl Resolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Filesystem location `path` maps to. Only one leading `/` is removed.
    pub fn locate(&self, path: &str) -> PathBuf {
        let relative = path.strip_prefix('/').unwrap_or(path);
        self.root.join(relative)
    }

    /// Looks up `path` under the document root.
    pub async fn resolve(&self, path: &str) -> Result<Resource, ResolveError> {
        let location = self.locate(path);

        let metadata = match fs::metadata(&location).await {
            Ok(metadata) => metadata,
            Err(e) if is_missing(&e) => {
                return Err(ResolveError::NotFound(path.to_string()));
            }
            Err(source) => {
                return Err(ResolveError::Io { path: location, source });
            }
        };

        if metadata.is_dir() {
            let entries = list_dir(&location).await?;
            tracing::debug!(path, entries = entries.len(), "Resolved directory");
            return Ok(Resource::Directory { entries });
        }

        let media_type = mime::guess_media_type(&location)
            .ok_or_else(|| ResolveError::UnknownMediaType(location.clone()))?;

        let body = fs::read(&location)
            .await
            .map_err(|source| ResolveError::Io { path: location.clone(), source })?;

        tracing::debug!(path, media_type, bytes = body.len(), "Resolved file");

        Ok(Resource::File {
            body,
            media_type: media_type.to_string(),
        })
    }
}

async fn list_dir(location: &Path) -> Result<Vec<String>, ResolveError> {
    let io_err = |source: io::Error| ResolveError::Io { path: location.to_path_buf(), source };

    let mut dir = fs::read_dir(location).await.map_err(io_err)?;
    let mut entries = Vec::new();

    while let Some(entry) = dir.next_entry().await.map_err(io_err)? {
        let name = entry
            .file_name()
            .into_string()
            .map_err(|name| ResolveError::NonUtf8EntryName(location.join(name)))?;
        entries.push(name);
    }

    Ok(entries)
}

/// A path whose parent is a regular file is as absent as a path with no entry.
fn is_missing(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
