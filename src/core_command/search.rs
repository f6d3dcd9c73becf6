use crate::constants::NO_MATCHES;
use crate::helpers::{format_listing, send_response};
use crate::session::Session;
use log::{info, warn};
use tokio::io::AsyncWrite;

pub async fn handle_search_command<W>(
    writer: &mut W,
    session: &Session,
    query: &str,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    match session.search(query).await {
        Ok(matches) => {
            info!(
                "Search for {:?} in {:?} matched {} entries",
                query,
                session.current_folder,
                matches.len()
            );
            send_response(writer, format_listing(&matches, NO_MATCHES).as_bytes()).await
        }
        Err(e) => {
            warn!("Search failed: {}", e);
            send_response(writer, e.to_response().as_bytes()).await
        }
    }
}
