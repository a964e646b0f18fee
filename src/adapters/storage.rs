use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Local file system storage.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let data = fs::read(path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, data)?;
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_files(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        Ok(fs::read_dir(dir)?
            .filter_map(|entry| candidate(entry, dir, extension))
            .collect())
    }
}

/// Keeps regular files with a matching extension. A bad entry is logged and skipped so
/// the rest of the folder is still listed.
fn candidate(entry: io::Result<fs::DirEntry>, dir: &Path, extension: &str) -> Option<PathBuf> {
    let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
            tracing::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
            return None;
        }
    };
    match entry.file_type() {
        Ok(kind) if kind.is_file() => {}
        Ok(_) => return None,
        Err(e) => {
            tracing::warn!("Skipping {}: {}", entry.path().display(), e);
            return None;
        }
    }

    let path = entry.path();
    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
    matches.then_some(path)
}
