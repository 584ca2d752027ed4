use std::path::PathBuf;
use std::time::Duration;

use probe_core::{ProbeConfig, Variant, DEFAULT_UI_ORIGIN};
use probe_engine::FetchSettings;

pub const USAGE: &str = "\
Usage: backend_probe [--minimal] [--once] [--timeout <secs>] [--log-file <path>]

  --minimal          collapse errors to one message and keep no debug log
  --once             probe once, print the result and exit (status 1 on failure)
  --timeout <secs>   give up on the request after this many seconds
  --log-file <path>  write process logs to a file instead of stderr
  --help             show this text

The backend base URL is read from PROBE_API_BASE_URL at build time.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Options {
    pub variant: Variant,
    pub once: bool,
    pub timeout: Option<Duration>,
    pub log_file: Option<PathBuf>,
    pub help: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("{flag} expects a value")]
    MissingValue { flag: &'static str },
    #[error("invalid --timeout value '{0}': expected whole seconds")]
    InvalidTimeout(String),
    #[error("unknown argument '{0}' (try --help)")]
    Unknown(String),
}

impl Options {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            request_timeout: self.timeout,
            ..FetchSettings::default()
        }
    }
}

pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options, OptionsError> {
    let mut options = Options::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--minimal" => options.variant = Variant::Minimal,
            "--once" => options.once = true,
            "--help" | "-h" => options.help = true,
            "--timeout" => {
                let value = args.next().ok_or(OptionsError::MissingValue { flag: "--timeout" })?;
                let secs: u64 = value
                    .parse()
                    .map_err(|_| OptionsError::InvalidTimeout(value.clone()))?;
                options.timeout = Some(Duration::from_secs(secs));
            }
            "--log-file" => {
                let value = args
                    .next()
                    .ok_or(OptionsError::MissingValue { flag: "--log-file" })?;
                options.log_file = Some(PathBuf::from(value));
            }
            _ => return Err(OptionsError::Unknown(arg)),
        }
    }
    Ok(options)
}

/// Configuration baked into this binary at compile time.
pub fn build_config(variant: Variant) -> ProbeConfig {
    config_from(
        option_env!("PROBE_API_BASE_URL"),
        option_env!("PROBE_UI_ORIGIN"),
        variant,
    )
}

/// An empty origin disables the cross-origin emulation.
fn config_from(base_url: Option<&str>, ui_origin: Option<&str>, variant: Variant) -> ProbeConfig {
    let ui_origin = match ui_origin {
        Some(origin) if origin.trim().is_empty() => None,
        Some(origin) => Some(origin.trim().to_string()),
        None => Some(DEFAULT_UI_ORIGIN.to_string()),
    };
    ProbeConfig {
        base_url: base_url.map(ToOwned::to_owned),
        ui_origin,
        variant,
    }
}
