use crate::core_fs::{filter_matches, list_entries, EntryFilter};
use crate::error::ShareError;
use log::warn;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Per-connection state. Owned by the connection task and never shared.
#[derive(Debug)]
pub struct Session {
    pub root_folder: Arc<PathBuf>, // canonical shared root, read-only
    pub current_folder: PathBuf,
    pub confine_to_root: bool,
}

impl Session {
    pub fn new(root_folder: Arc<PathBuf>, confine_to_root: bool) -> Self {
        Self {
            current_folder: root_folder.to_path_buf(),
            root_folder,
            confine_to_root,
        }
    }

    /// Subdirectories of the shared root, sent unsolicited when a client connects.
    pub async fn root_directories(&self) -> Result<Vec<String>, ShareError> {
        list_entries(&self.root_folder, EntryFilter::DirectoriesOnly)
            .await
            .map_err(|e| ShareError::FolderRead(self.root_folder.to_path_buf(), e))
    }

    /// Moves the cursor to `segment`, resolved against the current folder, and
    /// returns the entries found there.
    ///
    /// The cursor only moves when the target is a directory that could be
    /// listed. An absolute `segment` replaces the current folder entirely.
    pub async fn navigate(&mut self, segment: &str) -> Result<Vec<String>, ShareError> {
        // `join("")` would append a trailing separator to the stored cursor.
        let target = if segment.is_empty() {
            self.current_folder.clone()
        } else {
            self.current_folder.join(segment)
        };
        let is_dir = tokio::fs::metadata(&target)
            .await
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(ShareError::FolderNotFound(target));
        }

        let target = self
            .confine(&target)
            .ok_or(ShareError::FolderNotFound(target))?;
        let entries = list_entries(&target, EntryFilter::All)
            .await
            .map_err(|e| ShareError::FolderRead(target.clone(), e))?;

        self.current_folder = target;
        Ok(entries)
    }

    /// Entries of the current folder whose names contain `query`, ignoring case.
    pub async fn search(&self, query: &str) -> Result<Vec<String>, ShareError> {
        let entries = list_entries(&self.current_folder, EntryFilter::All)
            .await
            .map_err(|e| ShareError::FolderRead(self.current_folder.clone(), e))?;
        Ok(filter_matches(entries, query))
    }

    /// Resolves a download argument to a regular file.
    pub async fn resolve_file(&self, file_path: &str) -> Result<PathBuf, ShareError> {
        let target = self.current_folder.join(file_path);
        let is_file = tokio::fs::metadata(&target)
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(ShareError::FileNotFound(target));
        }

        self.confine(&target).ok_or(ShareError::FileNotFound(target))
    }

    /// Returns the path to use for `target`, or `None` when confinement is on
    /// and the canonical path leaves the shared root.
    fn confine(&self, target: &Path) -> Option<PathBuf> {
        if !self.confine_to_root {
            return Some(target.to_path_buf());
        }

        match target.canonicalize() {
            Ok(resolved) if resolved.starts_with(self.root_folder.as_path()) => Some(resolved),
            Ok(resolved) => {
                warn!("Path is outside of the shared root: {:?}", resolved);
                None
            }
            Err(e) => {
                warn!("Failed to canonicalize {:?}: {}", target, e);
                None
            }
        }
    }
}
