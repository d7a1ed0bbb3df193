//! Resource fetching: inline base64 data URIs and files next to the scene.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{PackError, Result};

/// Byte source behind relative resource URIs.
///
/// The packer never touches the filesystem directly; every relative URI is
/// resolved through this seam so the pipeline can run against an in-memory
/// tree in tests.
pub trait ResourceSource {
    /// Read the full contents of the resource at `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Reads resources from the directory containing the scene file.
#[derive(Debug, Clone)]
pub struct DirSource {
    base_dir: PathBuf,
}

impl DirSource {
    /// Create a source rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl ResourceSource for DirSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(self.base_dir.join(path))
    }
}

/// In-memory source for hermetic tests and embedded callers.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource at `path`.
    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }
}

impl ResourceSource for MemorySource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such resource: {}", path.display()),
            )
        })
    }
}

/// Resolve a URI to raw bytes.
///
/// `data:` URIs must be of the form `data:<content-type>;base64,<payload>`;
/// anything else is rejected. Every other URI is treated as a path relative
/// to the source. No caching: fetching the same URI twice reads it twice.
pub fn fetch(uri: &str, source: &dyn ResourceSource) -> Result<Vec<u8>> {
    match uri.strip_prefix("data:") {
        Some(rest) => decode_data_uri(uri, rest),
        None => Ok(source.read(Path::new(uri))?),
    }
}

fn decode_data_uri(uri: &str, rest: &str) -> Result<Vec<u8>> {
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| PackError::UnsupportedDataUri(uri.to_string()))?;

    let content_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| PackError::UnsupportedDataUri(uri.to_string()))?;

    let bytes = STANDARD.decode(payload)?;

    // Text payloads may be re-encoded by callers, so they must decode as
    // UTF-8; the body still stores the raw bytes.
    if content_type == "text/plain" {
        std::str::from_utf8(&bytes)?;
    }

    Ok(bytes)
}
