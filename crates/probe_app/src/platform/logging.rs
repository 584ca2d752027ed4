//! Process logging initialization for the probe binary.
//!
//! Logs go to stderr by default so they do not interleave with the screen
//! drawn on stdout; `--log-file` redirects them to a file instead.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Module prefixes whose records are kept; HTTP and TLS stack chatter is dropped.
const LOG_TARGETS: [&str; 2] = ["probe_", "backend_probe"];

/// Destination for log output.
pub enum LogDestination {
    /// Write to the given file, truncating it.
    File(PathBuf),
    /// Write to the terminal (stderr).
    Terminal,
}

impl LogDestination {
    pub fn from_option(path: Option<&Path>) -> Self {
        match path {
            Some(path) => LogDestination::File(path.to_path_buf()),
            None => LogDestination::Terminal,
        }
    }
}

/// Initialize the logger with the specified destination.
///
/// Falls back to the terminal when the log file cannot be created.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = build_config();

    let logger: Box<dyn SharedLogger> = match destination {
        LogDestination::File(path) => match create_file_logger(&path, level, config.clone()) {
            Some(file_logger) => file_logger,
            None => terminal_logger(level, config),
        },
        LogDestination::Terminal => terminal_logger(level, config),
    };

    let _ = CombinedLogger::init(vec![logger]);
}

fn build_config() -> Config {
    let mut builder = ConfigBuilder::new();
    builder
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error);
    for target in LOG_TARGETS {
        builder.add_filter_allow_str(target);
    }
    builder.build()
}

fn terminal_logger(level: LevelFilter, config: Config) -> Box<dyn SharedLogger> {
    TermLogger::new(level, config, TerminalMode::Stderr, ColorChoice::Auto)
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<dyn SharedLogger>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file) as Box<dyn SharedLogger>),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    use log::{Level, Log, Record};

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn emit(logger: &dyn Log, target: &str, text: &str) {
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target(target)
                .args(format_args!("{text}"))
                .build(),
        );
    }

    #[test]
    fn debug_level_drops_http_stack_records() {
        let buffer = SharedBuffer::default();
        let logger = WriteLogger::new(LevelFilter::Debug, build_config(), buffer.clone());

        emit(&*logger, "probe_engine::fetch", "engine line");
        emit(&*logger, "backend_probe::platform::app", "app line");
        emit(&*logger, "hyper_util::client::legacy::pool", "pool line");
        emit(&*logger, "rustls::client::hs", "handshake line");
        logger.flush();

        let written = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(written.contains("engine line"));
        assert!(written.contains("app line"));
        assert!(!written.contains("pool line"));
        assert!(!written.contains("handshake line"));
    }
}
