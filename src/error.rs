// Error types for the share protocol and its client
use crate::constants::{FILE_NOT_FOUND, FOLDER_NOT_FOUND};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShareError {
    #[error("Folder not found: {0:?}")]
    FolderNotFound(PathBuf),

    #[error("File not found: {0:?}")]
    FileNotFound(PathBuf),

    #[error("Failed to read folder {0:?}: {1}")]
    FolderRead(PathBuf, #[source] io::Error),
}

impl ShareError {
    /// The literal text sent back to the client for this outcome.
    pub fn to_response(&self) -> String {
        match self {
            ShareError::FolderNotFound(_) => FOLDER_NOT_FOUND.to_string(),
            ShareError::FileNotFound(_) => FILE_NOT_FOUND.to_string(),
            ShareError::FolderRead(_, e) if e.kind() == io::ErrorKind::NotFound => {
                FOLDER_NOT_FOUND.to_string()
            }
            ShareError::FolderRead(_, e) => format!("Error reading the folder: {}", e),
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Connection error: {0}")]
    Io(#[from] io::Error),

    #[error("Server closed the connection")]
    Disconnected,

    #[error("Request cannot contain a line break: {0:?}")]
    InvalidRequest(String),
}
