use crate::constants::{GET_PREFIX, SEARCH_PREFIX};

/// A decoded client request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Path segment resolved against the current folder (may be empty).
    Navigate(String),
    Download(String),
    Search(String),
}

impl Request {
    /// Classifies a request line by ordered prefix match on the trimmed text.
    ///
    /// There is no quoting: a folder literally named `get x` can never be
    /// navigated to.
    pub fn parse(line: &str) -> Request {
        let line = line.trim();
        if let Some(path) = line.strip_prefix(GET_PREFIX) {
            Request::Download(path.trim().to_string())
        } else if let Some(query) = line.strip_prefix(SEARCH_PREFIX) {
            Request::Search(query.trim().to_string())
        } else {
            Request::Navigate(line.to_string())
        }
    }
}

/// Splits one received chunk into request lines.
///
/// A chunk normally carries exactly one request without a terminator. When a
/// client pipelines newline-terminated requests they are returned in order
/// and blank lines are dropped. A chunk holding only whitespace is a single
/// empty navigation.
pub fn split_requests(chunk: &str) -> Vec<&str> {
    let lines: Vec<&str> = chunk
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        vec![""]
    } else {
        lines
    }
}
