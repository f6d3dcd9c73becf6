// Read-only access to the shared tree
pub mod listing;
pub mod matcher;

pub use listing::{list_entries, EntryFilter};
pub use matcher::filter_matches;
