use chrono::Local;
use env_logger::{Builder, Env};
use std::io::Write;

/// Installs the global logger. `RUST_LOG` still wins over the default level.
pub fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    Builder::from_env(Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            writeln!(buf, "[{}] [{}] {}", timestamp, record.level(), record.args())
        })
        .init();
}
