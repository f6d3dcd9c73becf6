use log::trace;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFilter {
    All,
    DirectoriesOnly,
}

/// Lists the names of the immediate children of `dir`.
///
/// Names are returned in the order the filesystem enumerates them. Symbolic
/// links count as directories when their target is one. Names that are not
/// valid UTF-8 are converted lossily.
///
/// # Arguments
///
/// * `dir` - The directory to enumerate.
/// * `filter` - Whether to keep files as well as directories.
///
/// # Returns
///
/// The entry names, or the error raised while opening or reading `dir`.
pub async fn list_entries(dir: &Path, filter: EntryFilter) -> io::Result<Vec<String>> {
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();

    while let Some(entry) = read_dir.next_entry().await? {
        if filter == EntryFilter::DirectoriesOnly {
            let is_dir = tokio::fs::metadata(entry.path())
                .await
                .map(|metadata| metadata.is_dir())
                .unwrap_or(false);
            if !is_dir {
                continue;
            }
        }
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    trace!("Listed {} entries in {:?}", names.len(), dir);
    Ok(names)
}
