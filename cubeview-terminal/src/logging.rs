//! Logger setup for the terminal viewer.
//!
//! The alternate screen owns stdout/stderr while the viewer runs, so records
//! are written to the file named in [`LoggingConfig`].

use std::fs::OpenOptions;
use std::io;
use std::sync::Once;

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main`, before the terminal switches screens.
pub fn init_logging(config: &LoggingConfig) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)?;
    let filter = config.filter.clone();

    INIT.call_once(move || {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder
            .target(env_logger::Target::Pipe(Box::new(file)))
            .write_style(env_logger::WriteStyle::Never);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });

    Ok(())
}
