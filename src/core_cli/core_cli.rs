use crate::config::{Config, TransferFraming};
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "rouilleshare",
    about = "Shares a directory tree over a simple line-oriented protocol."
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory to share
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Maximum number of sessions served at once
    #[arg(long)]
    pub max_sessions: Option<usize>,

    /// How the end of a downloaded file is signalled
    #[arg(long, value_enum)]
    pub framing: Option<TransferFraming>,

    /// Enable verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Command-line values take precedence over the configuration file.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.listen_port = port;
        }
        if let Some(root) = &self.root {
            config.server.root_folder = root.clone();
        }
        if let Some(max_sessions) = self.max_sessions {
            config.server.max_sessions = max_sessions;
        }
        if let Some(framing) = self.framing {
            config.server.transfer_framing = framing;
        }
    }
}
