pub mod network;
pub mod transfer;
