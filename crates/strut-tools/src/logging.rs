//! Logging configuration and subscriber setup.

use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const ENV_TRACE: &str = "STRUT_TRACE";
const ENV_FORMAT: &str = "STRUT_LOG_FORMAT";
const ENV_FILE: &str = "STRUT_LOG_FILE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Result<Self, LoggingError> {
        if value.eq_ignore_ascii_case("pretty") {
            Ok(LogFormat::Pretty)
        } else if value.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else {
            Err(LoggingError::InvalidFormat(value.to_string()))
        }
    }
}

/// Errors produced while configuring logging.
#[derive(Debug)]
pub enum LoggingError {
    InvalidFormat(String),
    InvalidFilter(String),
    OpenFile { path: PathBuf, source: io::Error },
    Init(String),
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::InvalidFormat(value) => write!(
                f,
                "Invalid {ENV_FORMAT} '{value}' (expected 'json' or 'pretty')"
            ),
            LoggingError::InvalidFilter(msg) => write!(f, "Invalid log filter: {msg}"),
            LoggingError::OpenFile { path, source } => {
                write!(f, "Failed to open log file {}: {source}", path.display())
            }
            LoggingError::Init(msg) => write!(f, "Failed to initialize logging: {msg}"),
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggingError::OpenFile { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Logging settings.
///
/// `level` is an `EnvFilter` directive such as `debug` or
/// `strut_expr=trace,strut_engine=info`; `off` disables output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "off".to_string(),
            format: LogFormat::Pretty,
            file: None,
        }
    }
}

impl LogConfig {
    /// Read `STRUT_TRACE`, `STRUT_LOG_FORMAT` and `STRUT_LOG_FILE`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if `STRUT_LOG_FORMAT` is neither `pretty` nor `json`.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LoggingError> {
        let mut config = Self::default();
        if let Some(level) = lookup(ENV_TRACE) {
            config.level = level;
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            config.format = LogFormat::parse(&format)?;
        }
        config.file = lookup(ENV_FILE).map(PathBuf::from);
        Ok(config)
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn is_off(&self) -> bool {
        self.level.eq_ignore_ascii_case("off")
    }

    fn filter(&self) -> Result<EnvFilter, LoggingError> {
        if self.is_off() {
            return Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()));
        }
        EnvFilter::try_new(&self.level).map_err(|err| LoggingError::InvalidFilter(err.to_string()))
    }
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.to_path_buf(),
            source,
        })
}

fn map_init_err<E: std::fmt::Display>(err: E) -> LoggingError {
    LoggingError::Init(err.to_string())
}

/// Install the global tracing subscriber.
///
/// Returns `Ok(false)` when a subscriber is already configured.
///
/// # Errors
///
/// Returns an error for a bad filter directive, an unopenable log file, or a
/// failed subscriber installation.
pub fn init_logging(config: &LogConfig) -> Result<bool, LoggingError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let filter = config.filter()?;
    let log_file = config.file.as_deref().map(open_log_file).transpose()?;

    match config.format {
        LogFormat::Json => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .json();
            let base = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer);
            if let Some(file) = log_file {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .json();
                base.with(file_layer).try_init().map_err(map_init_err)?;
            } else {
                base.try_init().map_err(map_init_err)?;
            }
        }
        LogFormat::Pretty => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .pretty();
            let base = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer);
            if let Some(file) = log_file {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .pretty();
                base.with(file_layer).try_init().map_err(map_init_err)?;
            } else {
                base.try_init().map_err(map_init_err)?;
            }
        }
    }

    tracing::debug!(
        component = "tools",
        operation = "init_logging",
        status = "success",
        level = %config.level,
        "Logging initialized"
    );
    Ok(true)
}
