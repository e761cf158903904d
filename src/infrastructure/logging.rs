use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_LOG_FILE: &str = "portage-list.log";

/// Installs the global subscriber, appending to `path`.
///
/// The terminal is owned by the UI, so logs never go to stdout. The filter
/// comes from `RUST_LOG` and defaults to `info`.
pub fn init_logging(path: &Path) -> Result<(), Box<dyn Error + Send + Sync>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_logs_go_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_LOG_FILE);
        init_logging(&path).unwrap();
        tracing::error!(records = 3, "written to the log file");

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("written to the log file"));
        assert!(content.contains("records=3"));
    }
}
