use crate::config::Config;
use crate::constants::{ACCEPT_RETRY_DELAY, REQUEST_BUFFER_SIZE};
use crate::core_command::{dispatch, split_requests, Request};
use crate::helpers::{format_listing, send_response};
use crate::session::Session;
use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::net::TcpListener;
use tokio::sync::Semaphore;

/// Binds the configured address and serves connections until the process
/// stops. Failing to bind is returned to the caller.
pub async fn start_server(config: Arc<Config>, root_folder: Arc<PathBuf>) -> Result<()> {
    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Server listening on {}", listener.local_addr()?);

    serve(listener, config, root_folder).await
}

/// Accept loop. Each connection gets its own task and its own [`Session`].
///
/// At most `max_sessions` connections are served at once; beyond that the
/// loop stops accepting until a session ends, leaving new clients queued in
/// the listen backlog.
pub async fn serve(
    listener: TcpListener,
    config: Arc<Config>,
    root_folder: Arc<PathBuf>,
) -> Result<()> {
    let limiter = Arc::new(Semaphore::new(config.server.max_sessions));

    loop {
        if limiter.available_permits() == 0 {
            warn!(
                "Session limit of {} reached, waiting for a session to end",
                config.server.max_sessions
            );
        }
        let permit = Arc::clone(&limiter)
            .acquire_owned()
            .await
            .context("Session limiter closed")?;

        let (socket, addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Failed to accept connection: {}", e);
                drop(permit);
                tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                continue;
            }
        };
        info!("Accepted connection from {}", addr);

        let config = Arc::clone(&config);
        let root_folder = Arc::clone(&root_folder);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, config, root_folder).await {
                error!("Connection error for {}: {:?}", addr, e);
            }
            info!("Connection closed for {}", addr);
            drop(permit);
        });
    }
}

/// Runs one session: sends the root's subdirectories, then answers requests
/// until the client closes the connection or a transport error occurs.
pub async fn handle_connection<S>(
    mut socket: S,
    config: Arc<Config>,
    root_folder: Arc<PathBuf>,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut session = Session::new(root_folder, config.server.confine_to_root);

    let greeting = match session.root_directories().await {
        Ok(names) => format_listing(&names, ""),
        Err(e) => {
            error!("Failed to list the shared root: {}", e);
            e.to_response()
        }
    };
    send_response(&mut socket, greeting.as_bytes()).await?;

    let mut buffer = vec![0u8; REQUEST_BUFFER_SIZE];
    loop {
        let n = socket.read(&mut buffer).await?;
        if n == 0 {
            debug!("Client closed the connection");
            break;
        }

        let chunk = String::from_utf8_lossy(&buffer[..n]);
        for line in split_requests(&chunk) {
            info!("Client requested: {}", line);
            dispatch(
                &mut socket,
                &config.server,
                &mut session,
                Request::parse(line),
            )
            .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use tokio::io::{duplex, AsyncWriteExt, DuplexStream};

    fn share() -> (TempDir, Arc<PathBuf>) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::create_dir(dir.path().join("pics")).unwrap();
        fs::write(dir.path().join("docs/a.txt"), b"contents of a").unwrap();
        fs::write(dir.path().join("docs/b.txt"), b"contents of b").unwrap();
        fs::write(dir.path().join("root.txt"), b"not a folder").unwrap();
        let root = Arc::new(dir.path().canonicalize().unwrap());
        (dir, root)
    }

    async fn read_message(client: &mut DuplexStream) -> String {
        let mut buffer = vec![0u8; 4096];
        let n = client.read(&mut buffer).await.unwrap();
        String::from_utf8_lossy(&buffer[..n]).into_owned()
    }

    async fn request(client: &mut DuplexStream, line: &str) -> String {
        client.write_all(line.as_bytes()).await.unwrap();
        read_message(client).await
    }

    fn spawn_session(root: Arc<PathBuf>) -> (DuplexStream, tokio::task::JoinHandle<Result<()>>) {
        let (client, server) = duplex(64 * 1024);
        let config = Arc::new(Config::default());
        let handle = tokio::spawn(handle_connection(server, config, root));
        (client, handle)
    }

    #[tokio::test]
    async fn test_greeting_lists_root_subdirectories_only() {
        let (_dir, root) = share();
        let (mut client, handle) = spawn_session(root);

        let greeting = read_message(&mut client).await;
        let mut names: Vec<&str> = greeting.split('\n').collect();
        names.sort();
        assert_eq!(names, vec!["docs", "pics"]);

        drop(client);
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_greeting_is_empty_without_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("only.txt"), b"x").unwrap();
        let (mut client, handle) = spawn_session(Arc::new(dir.path().canonicalize().unwrap()));

        // An empty greeting writes nothing, so the first read sees the reply.
        let reply = request(&mut client, "search only").await;
        assert_eq!(reply, "only.txt");

        drop(client);
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_failed_navigation_keeps_position() {
        let (_dir, root) = share();
        let (mut client, handle) = spawn_session(root);
        read_message(&mut client).await;

        assert_eq!(
            request(&mut client, "missing").await,
            "The folder does not exist."
        );
        assert_eq!(
            request(&mut client, "root.txt").await,
            "The folder does not exist."
        );
        assert_eq!(request(&mut client, "pics").await, "The folder is empty.");

        drop(client);
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_pipelined_requests_are_answered_in_order() {
        let (_dir, root) = share();
        let (mut client, handle) = spawn_session(root);
        read_message(&mut client).await;

        client.write_all(b"docs\nsearch B\n").await.unwrap();
        client.shutdown().await.unwrap();

        let mut replies = String::new();
        client.read_to_string(&mut replies).await.unwrap();
        let (listing, search) = replies.split_at(replies.len() - "b.txt".len());
        let mut names: Vec<&str> = listing.split('\n').collect();
        names.sort();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        assert_eq!(search, "b.txt");

        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_download_then_disconnect() {
        let (_dir, root) = share();
        let (mut client, handle) = spawn_session(root);
        read_message(&mut client).await;
        request(&mut client, "docs").await;

        client.write_all(b"get a.txt").await.unwrap();
        client.shutdown().await.unwrap();
        let mut received = Vec::new();
        client.read_to_end(&mut received).await.unwrap();
        assert_eq!(received, b"Sending file...contents of aDONE");

        handle.await.unwrap().unwrap();
    }
}
