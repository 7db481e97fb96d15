//! File sources feeding the catalog

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

/// A raw file handle the session can read asynchronously.
///
/// Mirrors what file pickers hand over: a display name, an optional media
/// type, and a deferred byte payload.
#[async_trait]
pub trait FileSource: Send + Sync {
    fn name(&self) -> &str;

    /// Declared media type, when the provider knows one (`image/png`, ...).
    fn mime_type(&self) -> Option<&str>;

    /// Read the full byte payload.
    async fn read(&self) -> io::Result<Vec<u8>>;
}

/// Filesystem-backed source. The media type is derived from the extension.
pub struct PathSource {
    path: PathBuf,
    name: String,
    mime: Option<&'static str>,
}

impl PathSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());
        let mime = mime_for_extension(&path);

        Self { path, name, mime }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FileSource for PathSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> Option<&str> {
        self.mime
    }

    async fn read(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

/// In-memory source, for tests and embedders that already hold the bytes.
pub struct MemorySource {
    name: String,
    mime: Option<String>,
    data: Vec<u8>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, mime: Option<&str>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.map(str::to_string),
            data,
        }
    }
}

#[async_trait]
impl FileSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> Option<&str> {
        self.mime.as_deref()
    }

    async fn read(&self) -> io::Result<Vec<u8>> {
        Ok(self.data.clone())
    }
}

/// Media type for a known image extension.
fn mime_for_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}
