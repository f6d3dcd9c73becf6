// Here's the list of the share commands implemented
pub mod command;
pub mod get;
pub mod handlers;
pub mod navigate;
pub mod search;

pub use command::{split_requests, Request};
pub use handlers::dispatch;
