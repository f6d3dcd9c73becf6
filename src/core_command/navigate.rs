use crate::constants::FOLDER_EMPTY;
use crate::helpers::{format_listing, send_response};
use crate::session::Session;
use log::{debug, warn};
use tokio::io::AsyncWrite;

/// Handles a navigation request.
///
/// On success the session cursor moves to the target folder and its entries
/// are sent newline-joined, or `The folder is empty.` when it has none.
/// Otherwise `The folder does not exist.` is sent and the cursor stays put.
pub async fn handle_navigate_command<W>(
    writer: &mut W,
    session: &mut Session,
    arg: &str,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    match session.navigate(arg).await {
        Ok(names) => {
            debug!("Current folder is now {:?}", session.current_folder);
            send_response(writer, format_listing(&names, FOLDER_EMPTY).as_bytes()).await
        }
        Err(e) => {
            warn!("Navigation to {:?} refused: {}", arg, e);
            send_response(writer, e.to_response().as_bytes()).await
        }
    }
}
