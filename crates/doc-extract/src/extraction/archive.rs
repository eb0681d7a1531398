//! ZIP container access shared by the Office Open XML extractors

use std::io::{Cursor, Read};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{ExtractError, ExtractResult};

/// One named member of an archive
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub path: String,
    pub data: Vec<u8>,
}

impl ArchiveEntry {
    /// Decode the payload as UTF-8
    pub fn into_text(self) -> ExtractResult<String> {
        Ok(String::from_utf8(self.data)?)
    }
}

/// Read-only view over a ZIP-structured byte buffer
pub struct Archive<'a> {
    inner: ZipArchive<Cursor<&'a [u8]>>,
}

impl<'a> Archive<'a> {
    /// Open a byte buffer as an archive
    pub fn open(data: &'a [u8]) -> ExtractResult<Self> {
        let inner = ZipArchive::new(Cursor::new(data))?;
        Ok(Self { inner })
    }

    /// Number of entries in the archive
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Entry paths starting with `prefix` and ending with `suffix`,
    /// sorted lexicographically (`slide10.xml` sorts before `slide2.xml`).
    pub fn list_entries(&self, prefix: &str, suffix: &str) -> Vec<String> {
        let mut paths: Vec<String> = self
            .inner
            .file_names()
            .filter(|name| name.starts_with(prefix) && name.ends_with(suffix))
            .map(str::to_string)
            .collect();
        paths.sort();
        paths
    }

    /// Read the raw bytes of one entry
    pub fn read_entry(&mut self, path: &str) -> ExtractResult<ArchiveEntry> {
        let mut file = self.inner.by_name(path).map_err(|e| match e {
            ZipError::FileNotFound => ExtractError::EntryMissing(path.to_string()),
            other => ExtractError::corrupt_archive(format!("{}: {}", path, other)),
        })?;

        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data)
            .map_err(|e| ExtractError::corrupt_archive(format!("{}: {}", path, e)))?;

        Ok(ArchiveEntry {
            path: path.to_string(),
            data,
        })
    }

    /// Read one entry as UTF-8 text
    pub fn read_text(&mut self, path: &str) -> ExtractResult<String> {
        self.read_entry(path)?.into_text()
    }
}
