use std::path::PathBuf;
use thiserror::Error;

/// Whether a failed load is worth retrying as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The resource could not be reached; the same request may succeed later.
    Recoverable,
    /// The resource was reached but its content cannot be used.
    Fatal,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("{origin} is not valid UTF-8 text")]
    Encoding { origin: String },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV has no header row")]
    MissingHeader,
}

impl LoadError {
    pub fn severity(&self) -> Severity {
        match self {
            LoadError::Io { .. } | LoadError::Transport { .. } | LoadError::Status { .. } => {
                Severity::Recoverable
            }
            LoadError::Encoding { .. } | LoadError::Csv(_) | LoadError::MissingHeader => {
                Severity::Fatal
            }
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.severity() == Severity::Recoverable
    }
}

pub type LoadResult<T> = Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_resources_are_recoverable() {
        let io = LoadError::Io {
            path: PathBuf::from("data/companies.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(io.severity(), Severity::Recoverable);

        let status = LoadError::Status { url: "http://localhost/data.csv".to_string(), status: 503 };
        assert!(status.is_recoverable());

        let transport = LoadError::Transport {
            url: "http://localhost/data.csv".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(transport.is_recoverable());
    }

    #[test]
    fn test_unusable_content_is_fatal() {
        assert_eq!(LoadError::MissingHeader.severity(), Severity::Fatal);
        let encoding = LoadError::Encoding { origin: "bundled data".to_string() };
        assert!(!encoding.is_recoverable());
    }

    #[test]
    fn test_error_messages() {
        let status = LoadError::Status { url: "http://x/c.csv".to_string(), status: 404 };
        assert_eq!(status.to_string(), "http://x/c.csv answered with HTTP 404");
        assert_eq!(LoadError::MissingHeader.to_string(), "CSV has no header row");
    }
}
