use crate::config::TransferFraming;
use crate::constants::{SENDING_FILE, TRANSFER_SENTINEL};
use crate::helpers::send_response;
use log::{debug, error, info};
use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Streams a file to the client after the `Sending file...` status.
///
/// The status is always sent first. With [`TransferFraming::Sentinel`] the
/// payload is followed by `DONE`. Any I/O error from then on, including
/// failing to open the file, is reported as text on the same channel and the
/// session carries on; the client cannot tell it apart from payload.
///
/// With [`TransferFraming::LengthPrefixed`] the status is followed by the file
/// length as a big-endian `u64` and exactly that many bytes. An I/O error after
/// the status is returned, because the promised payload can no longer be
/// delivered and the connection has to be dropped.
///
/// # Arguments
///
/// * `writer` - The client connection.
/// * `path` - The resolved file to send.
/// * `framing` - How the end of the payload is signalled.
/// * `chunk_size` - Size of each read from the file.
///
/// # Returns
///
/// The number of payload bytes written.
pub async fn send_file<W>(
    writer: &mut W,
    path: &Path,
    framing: TransferFraming,
    chunk_size: usize,
) -> Result<u64, io::Error>
where
    W: AsyncWrite + Unpin,
{
    send_response(writer, SENDING_FILE.as_bytes()).await?;
    info!("Sending file: {:?}", path);

    let sent = match framing {
        TransferFraming::Sentinel => match File::open(path).await {
            Ok(file) => stream_until_eof(writer, file, chunk_size).await?,
            Err(e) => {
                report_read_error(writer, &e).await?;
                return Ok(0);
            }
        },
        TransferFraming::LengthPrefixed => {
            let file = File::open(path).await?;
            let length = file.metadata().await?.len();
            writer.write_all(&length.to_be_bytes()).await?;
            stream_exact(writer, file, length, chunk_size).await?
        }
    };
    writer.flush().await?;

    info!("File sent: {:?} ({} bytes)", path, sent);
    Ok(sent)
}

async fn report_read_error<W>(writer: &mut W, e: &io::Error) -> Result<(), io::Error>
where
    W: AsyncWrite + Unpin,
{
    let error_message = format!("Error reading the file: {}", e);
    error!("{}", error_message);
    send_response(writer, error_message.as_bytes()).await
}

/// Copies `reader` to `writer` until EOF, then writes the sentinel.
///
/// A read error is sent as text in place of the rest of the payload and no
/// sentinel follows; only write errors are returned.
pub(crate) async fn stream_until_eof<R, W>(
    writer: &mut W,
    mut reader: R,
    chunk_size: usize,
) -> Result<u64, io::Error>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = vec![0; chunk_size];
    let mut sent = 0u64;
    loop {
        let bytes_read = match reader.read(&mut buffer).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                report_read_error(writer, &e).await?;
                return Ok(sent);
            }
        };
        writer.write_all(&buffer[..bytes_read]).await?;
        sent += bytes_read as u64;
    }

    writer.write_all(TRANSFER_SENTINEL).await?;
    debug!("Sentinel written after {} bytes", sent);
    Ok(sent)
}

/// Copies exactly `length` bytes. A read error or a short read is returned.
pub(crate) async fn stream_exact<R, W>(
    writer: &mut W,
    reader: R,
    length: u64,
    chunk_size: usize,
) -> Result<u64, io::Error>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    // Bytes appended after the length was taken are not sent.
    let mut reader = reader.take(length);
    let mut buffer = vec![0; chunk_size];
    let mut sent = 0u64;
    while sent < length {
        let bytes_read = reader.read(&mut buffer).await?;
        if bytes_read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("file shrank during transfer: {} of {} bytes", sent, length),
            ));
        }
        writer.write_all(&buffer[..bytes_read]).await?;
        sent += bytes_read as u64;
    }
    Ok(sent)
}
