use anyhow::Result;
use clap::Parser;
use rouilleshare::config::Config;
use rouilleshare::core_cli::Cli;
use rouilleshare::core_log::logger::init_logger;
use rouilleshare::server;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Cli::parse();

    init_logger(args.verbose);

    // Determine the default config path based on the OS
    let default_config_path = if cfg!(target_os = "windows") {
        "C:\\rouilleshare\\etc\\rouilleshare.conf"
    } else {
        "/etc/rouilleshare.conf"
    };

    // An explicit --config must exist; the default one is optional
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None if Path::new(default_config_path).exists() => {
            Config::load_from_file(Path::new(default_config_path))?
        }
        None => Config::default(),
    };
    args.apply_overrides(&mut config);

    server::run(config).await?;

    Ok(())
}
