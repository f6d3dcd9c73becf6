use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Sends a response to the client.
pub async fn send_response<W>(writer: &mut W, message: &[u8]) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(message).await?;
    writer.flush().await?;
    Ok(())
}

/// Newline-joined names, or `empty_message` when there are none.
pub fn format_listing(names: &[String], empty_message: &str) -> String {
    if names.is_empty() {
        empty_message.to_string()
    } else {
        names.join("\n")
    }
}
