use crate::domain::{Dataset, DatasetParser, LoadError, LoadResult};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// CSV data compiled into the binary.
pub const BUNDLED_CSV: &str = include_str!("../../data/companies.csv");

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the company CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DataSource {
    #[default]
    Bundled,
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// Interprets a command-line value: `http://` and `https://` values are
    /// URLs, anything else a file path, nothing the bundled data.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None => DataSource::Bundled,
            Some(value) if value.starts_with("http://") || value.starts_with("https://") => {
                DataSource::Url(value.to_string())
            }
            Some(value) => DataSource::File(PathBuf::from(value)),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Bundled => write!(f, "bundled data"),
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{}", url),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CsvLoader {
    timeout: Duration,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl CsvLoader {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Fetches and parses the dataset from `source`.
    ///
    /// Schema problems (known columns absent from the header, rows shorter
    /// than the header) are logged and do not fail the load.
    pub fn load(&self, source: &DataSource) -> LoadResult<Dataset> {
        let text = self.fetch(source)?;
        let dataset = DatasetParser::parse(&text)?;

        info!(source = %source, records = dataset.len(), columns = dataset.schema().len(), "dataset loaded");
        if !dataset.schema().missing().is_empty() {
            warn!(missing = ?dataset.schema().missing(), "known columns absent from header");
        }
        let incomplete = dataset.incomplete_rows();
        if !incomplete.is_empty() {
            warn!(rows = incomplete.len(), "records with fewer fields than the header");
        }

        Ok(dataset)
    }

    fn fetch(&self, source: &DataSource) -> LoadResult<String> {
        match source {
            DataSource::Bundled => Ok(BUNDLED_CSV.to_string()),
            DataSource::File(path) => {
                let bytes = fs::read(path).map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })?;
                String::from_utf8(bytes).map_err(|_| LoadError::Encoding {
                    origin: path.display().to_string(),
                })
            }
            DataSource::Url(url) => self.fetch_url(url),
        }
    }

    fn fetch_url(&self, url: &str) -> LoadResult<String> {
        let transport = |e: reqwest::Error| LoadError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(transport)?;
        let response = client.get(url).send().map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().map_err(transport)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| LoadError::Encoding {
            origin: url.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_source_from_arg() {
        assert_eq!(DataSource::from_arg(None), DataSource::Bundled);
        assert_eq!(
            DataSource::from_arg(Some("https://example.org/companies.csv")),
            DataSource::Url("https://example.org/companies.csv".to_string())
        );
        assert_eq!(
            DataSource::from_arg(Some("data/companies.csv")),
            DataSource::File(PathBuf::from("data/companies.csv"))
        );
    }

    #[test]
    fn test_load_bundled() {
        let dataset = CsvLoader::default().load(&DataSource::Bundled).unwrap();
        assert!(!dataset.is_empty());
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "A,B\n1,2\n\n3,4\n").unwrap();

        let dataset = CsvLoader::default()
            .load(&DataSource::File(file.path().to_path_buf()))
            .unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_missing_file_is_recoverable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let err = CsvLoader::default().load(&DataSource::File(path)).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert_eq!(err.severity(), Severity::Recoverable);
    }

    #[test]
    fn test_non_utf8_file_is_fatal() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[b'A', b'\n', 0xff, 0xfe, b'\n']).unwrap();
        let err = CsvLoader::default()
            .load(&DataSource::File(file.path().to_path_buf()))
            .unwrap_err();
        assert!(matches!(err, LoadError::Encoding { .. }));
        assert_eq!(err.severity(), Severity::Fatal);
    }

    #[test]
    fn test_empty_file_is_fatal() {
        let file = NamedTempFile::new().unwrap();
        let err = CsvLoader::default()
            .load(&DataSource::File(file.path().to_path_buf()))
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingHeader));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_unreachable_url_is_recoverable() {
        let loader = CsvLoader::new(Duration::from_secs(1));
        let err = loader
            .load(&DataSource::Url("http://127.0.0.1:9/companies.csv".to_string()))
            .unwrap_err();
        assert!(matches!(err, LoadError::Transport { .. }));
        assert!(err.is_recoverable());
    }
}
