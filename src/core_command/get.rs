use crate::config::ServerConfig;
use crate::core_network::transfer::send_file;
use crate::helpers::send_response;
use crate::session::Session;
use log::warn;
use tokio::io::AsyncWrite;

/// Handles a download (`get <path>`) request.
///
/// The path is resolved against the session's current folder; absolute paths
/// are taken as they are. Missing files, non-regular files and, when
/// confinement is enabled, files outside the shared root are answered with
/// `The file does not exist.` and no payload.
///
/// # Arguments
///
/// * `writer` - The client connection.
/// * `config` - Server settings (framing and chunk size).
/// * `session` - The requesting session.
/// * `arg` - The requested file path.
///
/// # Returns
///
/// Result<(), std::io::Error> indicating whether the connection is still usable.
pub async fn handle_get_command<W>(
    writer: &mut W,
    config: &ServerConfig,
    session: &Session,
    arg: &str,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let file_path = match session.resolve_file(arg).await {
        Ok(path) => path,
        Err(e) => {
            warn!("Download of {:?} refused: {}", arg, e);
            return send_response(writer, e.to_response().as_bytes()).await;
        }
    };

    send_file(
        writer,
        &file_path,
        config.transfer_framing,
        config.download_buffer_size(),
    )
    .await?;
    Ok(())
}
