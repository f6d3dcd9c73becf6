use crate::config::TransferFraming;
use crate::constants::{GET_PREFIX, RESPONSE_BUFFER_SIZE, SEARCH_PREFIX, SENDING_FILE, TRANSFER_SENTINEL};
use crate::error::ClientError;
use log::debug;
use std::path::Path;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};

/// Outcome of a `get` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Download {
    Received(Vec<u8>),
    /// The server answered with a message instead of a payload.
    Refused(String),
}

/// Programmatic client for the share protocol.
///
/// Every response except a file payload is read with a single receive, so
/// the client must issue one request at a time.
pub struct FileClient {
    stream: TcpStream,
    framing: TransferFraming,
}

impl FileClient {
    /// Connects to a server. `framing` must match the server's setting.
    pub async fn connect<A: ToSocketAddrs>(
        addr: A,
        framing: TransferFraming,
    ) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self { stream, framing })
    }

    /// Reads the unsolicited list of the root's subdirectories.
    ///
    /// A root without subdirectories produces an empty greeting, which puts
    /// nothing on the wire; do not call this in that case.
    pub async fn request_directories(&mut self) -> Result<String, ClientError> {
        self.read_message().await
    }

    pub async fn navigate_folder(&mut self, folder_path: &str) -> Result<String, ClientError> {
        self.send_request(folder_path).await?;
        self.read_message().await
    }

    pub async fn search(&mut self, query: &str) -> Result<String, ClientError> {
        self.send_request(&format!("{}{}", SEARCH_PREFIX, query))
            .await?;
        self.read_message().await
    }

    /// Requests a file and collects its payload.
    pub async fn fetch_file(&mut self, file_path: &str) -> Result<Download, ClientError> {
        self.send_request(&format!("{}{}", GET_PREFIX, file_path))
            .await?;

        let mut status = vec![0u8; SENDING_FILE.len()];
        self.stream.read_exact(&mut status).await?;
        if status != SENDING_FILE.as_bytes() {
            let rest = self.read_message().await?;
            let message = format!("{}{}", String::from_utf8_lossy(&status), rest);
            return Ok(Download::Refused(message));
        }

        let data = match self.framing {
            TransferFraming::Sentinel => self.read_until_sentinel().await?,
            TransferFraming::LengthPrefixed => self.read_length_prefixed().await?,
        };
        debug!("Received {} bytes for {}", data.len(), file_path);
        Ok(Download::Received(data))
    }

    /// Fetches a file and writes it to `download_path`.
    ///
    /// # Returns
    ///
    /// A human-readable outcome: the success notice, or the server's message
    /// when the file was refused.
    pub async fn download_file(
        &mut self,
        file_path: &str,
        download_path: &Path,
    ) -> Result<String, ClientError> {
        match self.fetch_file(file_path).await? {
            Download::Received(data) => {
                tokio::fs::write(download_path, data).await?;
                Ok(format!(
                    "File downloaded successfully at {}.",
                    download_path.display()
                ))
            }
            Download::Refused(message) => Ok(message),
        }
    }

    pub async fn disconnect(mut self) -> Result<(), ClientError> {
        self.stream.shutdown().await?;
        Ok(())
    }

    async fn send_request(&mut self, request: &str) -> Result<(), ClientError> {
        if request.contains('\n') {
            return Err(ClientError::InvalidRequest(request.to_string()));
        }
        self.stream.write_all(request.as_bytes()).await?;
        Ok(())
    }

    async fn read_message(&mut self) -> Result<String, ClientError> {
        let mut buffer = vec![0u8; RESPONSE_BUFFER_SIZE];
        let n = self.stream.read(&mut buffer).await?;
        if n == 0 {
            return Err(ClientError::Disconnected);
        }
        Ok(String::from_utf8_lossy(&buffer[..n]).into_owned())
    }

    async fn read_until_sentinel(&mut self) -> Result<Vec<u8>, ClientError> {
        read_until_sentinel(&mut self.stream).await
    }

    async fn read_length_prefixed(&mut self) -> Result<Vec<u8>, ClientError> {
        let length = self.stream.read_u64().await?;
        let mut data = Vec::new();
        (&mut self.stream).take(length).read_to_end(&mut data).await?;
        if (data.len() as u64) < length {
            return Err(ClientError::Disconnected);
        }
        Ok(data)
    }
}

// Stops at the first read that leaves the collected bytes ending in the
// sentinel, so a payload ending in `DONE` at a read boundary is cut short.
// The length-prefixed framing does not have this problem.
async fn read_until_sentinel<R>(reader: &mut R) -> Result<Vec<u8>, ClientError>
where
    R: AsyncRead + Unpin,
{
    let mut data = Vec::new();
    let mut buffer = vec![0u8; 8192];
    loop {
        let n = reader.read(&mut buffer).await?;
        if n == 0 {
            return Err(ClientError::Disconnected);
        }
        data.extend_from_slice(&buffer[..n]);
        if data.ends_with(TRANSFER_SENTINEL) {
            data.truncate(data.len() - TRANSFER_SENTINEL.len());
            return Ok(data);
        }
    }
}
