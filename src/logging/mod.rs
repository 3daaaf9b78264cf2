mod init;
pub use init::{init_logging, parse_level, parse_rotation};
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::rolling::Rotation;

/// Log filename prefix inside the log directory.
pub const LOG_FILENAME: &str = "kakurenbo.log";

/// Default log directory: `~/.kakurenbo/logs`.
pub fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".kakurenbo")
        .join("logs")
}

/// Configuration for the logging system.
///
/// Console output always goes to stderr; stdout is reserved for command
/// output. A rolling log file is written only when `log_dir` is set.
pub struct LogConfig {
    pub log_dir: Option<PathBuf>,
    pub log_level: Level,
    pub json_format: bool,
    pub rotation: Rotation,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            log_level: Level::WARN,
            json_format: false,
            rotation: Rotation::DAILY,
        }
    }
}
