// src/constants.rs

use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5555;
pub const DEFAULT_MAX_SESSIONS: usize = 64;

// Pause after a failed accept (e.g. out of file descriptors).
pub const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Requests are read as a single chunk of at most this many bytes.
pub const REQUEST_BUFFER_SIZE: usize = 1024;
/// Clients read listing responses with a single receive of this size.
pub const RESPONSE_BUFFER_SIZE: usize = 1024 * 1024;
pub const DEFAULT_DOWNLOAD_BUFFER_SIZE: usize = 1024;

pub const GET_PREFIX: &str = "get ";
pub const SEARCH_PREFIX: &str = "search ";

pub const FOLDER_EMPTY: &str = "The folder is empty.";
pub const FOLDER_NOT_FOUND: &str = "The folder does not exist.";
pub const FILE_NOT_FOUND: &str = "The file does not exist.";
pub const SENDING_FILE: &str = "Sending file...";
pub const NO_MATCHES: &str = "No matches found.";

pub const TRANSFER_SENTINEL: &[u8] = b"DONE";
