//! File-backed process source using capability-based filesystem access.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;

use crate::process::ports::{ProcessConfigSource, ProcessSourceError, ProcessSourceResult};

/// Process document stored as a JSON file inside a directory capability.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// document, so readers never observe a partially written file.
#[derive(Debug)]
pub struct FileProcessSource {
    dir: Dir,
    file_name: Utf8PathBuf,
}

impl FileProcessSource {
    /// Opens `directory` and binds the source to `file_name` inside it.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::Error`] when the directory cannot be opened.
    pub fn open(directory: &Utf8Path, file_name: impl Into<Utf8PathBuf>) -> std::io::Result<Self> {
        let dir = Dir::open_ambient_dir(directory, ambient_authority())?;
        Ok(Self {
            dir,
            file_name: file_name.into(),
        })
    }

    /// Returns the document file name relative to the directory.
    #[must_use]
    pub fn file_name(&self) -> &Utf8Path {
        &self.file_name
    }

    fn staging_name(&self) -> Utf8PathBuf {
        let mut staging = self.file_name.clone().into_string();
        staging.push_str(".tmp");
        Utf8PathBuf::from(staging)
    }
}

#[async_trait]
impl ProcessConfigSource for FileProcessSource {
    async fn read(&self) -> ProcessSourceResult<String> {
        self.dir
            .read_to_string(&self.file_name)
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => ProcessSourceError::NotFound(self.file_name.to_string()),
                _ => ProcessSourceError::persistence(err),
            })
    }

    async fn write(&self, document: &str) -> ProcessSourceResult<()> {
        let staging = self.staging_name();
        self.dir
            .write(&staging, document)
            .map_err(ProcessSourceError::persistence)?;
        self.dir
            .rename(&staging, &self.dir, &self.file_name)
            .map_err(ProcessSourceError::persistence)
    }
}
