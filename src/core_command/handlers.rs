use crate::config::ServerConfig;
use crate::core_command::command::Request;
use crate::core_command::{get, navigate, search};
use crate::session::Session;
use tokio::io::AsyncWrite;

/// Runs one request against the session and writes its response.
///
/// An `Err` means the connection can no longer be used; every protocol-level
/// failure is answered on the wire instead.
pub async fn dispatch<W>(
    writer: &mut W,
    config: &ServerConfig,
    session: &mut Session,
    request: Request,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    match request {
        Request::Navigate(segment) => {
            navigate::handle_navigate_command(writer, session, &segment).await
        }
        Request::Download(path) => get::handle_get_command(writer, config, session, &path).await,
        Request::Search(query) => search::handle_search_command(writer, session, &query).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn share() -> (TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        fs::write(dir.path().join("docs/a.txt"), b"alpha").unwrap();
        fs::write(dir.path().join("Alpha.md"), b"# alpha").unwrap();
        let root: Arc<PathBuf> = Arc::new(dir.path().canonicalize().unwrap());
        (dir, Session::new(root, true))
    }

    async fn run(session: &mut Session, line: &str) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::new();
        dispatch(&mut out, &ServerConfig::default(), session, Request::parse(line))
            .await
            .unwrap();
        out
    }

    #[tokio::test]
    async fn test_navigate_responses() {
        let (_dir, mut session) = share();
        assert_eq!(run(&mut session, "docs").await, b"a.txt");
        assert_eq!(run(&mut session, "nowhere").await, b"The folder does not exist.");
        assert_eq!(run(&mut session, "../empty").await, b"The folder is empty.");
    }

    #[tokio::test]
    async fn test_search_responses() {
        let (_dir, mut session) = share();
        assert_eq!(run(&mut session, "search ALPHA").await, b"Alpha.md");
        assert_eq!(run(&mut session, "search zzz").await, b"No matches found.");
        run(&mut session, "empty").await;
        assert_eq!(run(&mut session, "search a").await, b"No matches found.");
    }

    #[tokio::test]
    async fn test_get_responses() {
        let (_dir, mut session) = share();
        assert_eq!(
            run(&mut session, "get missing.txt").await,
            b"The file does not exist."
        );
        assert_eq!(run(&mut session, "get docs").await, b"The file does not exist.");
        assert_eq!(
            run(&mut session, "get docs/a.txt").await,
            b"Sending file...alphaDONE"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_get_on_unopenable_file_sends_status_before_error() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, mut session) = share();
        let locked = dir.path().join("locked.bin");
        fs::write(&locked, b"secret").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o200)).unwrap();
        if fs::File::open(&locked).is_ok() {
            // Permission bits do not apply to this user (e.g. root).
            return;
        }

        let out = run(&mut session, "get locked.bin").await;
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Sending file...Error reading the file: "));
        assert!(!text.ends_with("DONE"));

        // The session still answers.
        assert_eq!(run(&mut session, "docs").await, b"a.txt");
    }
}
