//! Command-line configuration.

use crate::domain::{FilterMatch, Preferences, Theme, DEFAULT_PAGE_SIZE};
use crate::infrastructure::{DataSource, DEFAULT_LOG_FILE, DEFAULT_PREFERENCES_FILE};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

/// Comparateur des sociétés de portage salarial en France.
#[derive(Debug, Clone, Parser)]
#[command(name = "portage-list", version, about)]
pub struct Config {
    /// CSV file or http(s) URL to load instead of the bundled data
    #[arg(short, long)]
    pub source: Option<String>,

    /// Rows per table page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Match the name filter without regard to case
    ///
    /// Without this flag the filter is case-sensitive: "alpha" does not find
    /// "Alpha Portage". With it, the filter matches the way the web
    /// comparator does.
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Colour theme, overriding the saved preference
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,

    /// Preferences file
    #[arg(long, default_value = DEFAULT_PREFERENCES_FILE)]
    pub prefs: PathBuf,

    /// Log file
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// HTTP timeout when the source is a URL
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}

/// Runtime settings resolved from the command line and saved preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub source: DataSource,
    pub page_size: usize,
    pub matcher: FilterMatch,
    pub theme: Theme,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: DataSource::Bundled,
            page_size: DEFAULT_PAGE_SIZE,
            matcher: FilterMatch::CaseSensitive,
            theme: Theme::default(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl Settings {
    pub fn resolve(config: &Config, preferences: &Preferences) -> Self {
        Self {
            source: DataSource::from_arg(config.source.as_deref()),
            page_size: config.page_size,
            matcher: if config.ignore_case {
                FilterMatch::CaseInsensitive
            } else {
                FilterMatch::CaseSensitive
            },
            theme: config.theme.map(Theme::from).unwrap_or(preferences.theme),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["portage-list"]).unwrap();
        let settings = Settings::resolve(&config, &Preferences::default());
        assert_eq!(settings, Settings::default());
        assert_eq!(config.prefs, PathBuf::from(DEFAULT_PREFERENCES_FILE));
    }

    #[test]
    fn test_ignore_case_help_describes_default() {
        use clap::CommandFactory;

        let help = Config::command().render_long_help().to_string();
        assert!(help.contains("--ignore-case"));
        assert!(help.contains("case-sensitive"));
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "portage-list",
            "--source",
            "https://example.org/companies.csv",
            "--page-size",
            "25",
            "-i",
            "--theme",
            "light",
        ])
        .unwrap();
        let settings = Settings::resolve(&config, &Preferences { theme: Theme::Dark });
        assert_eq!(settings.source, DataSource::Url("https://example.org/companies.csv".to_string()));
        assert_eq!(settings.page_size, 25);
        assert_eq!(settings.matcher, FilterMatch::CaseInsensitive);
        assert_eq!(settings.theme, Theme::Light);
    }

    #[test]
    fn test_saved_theme_applies_without_flag() {
        let config = Config::try_parse_from(["portage-list", "-s", "local.csv"]).unwrap();
        let settings = Settings::resolve(&config, &Preferences { theme: Theme::Light });
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.source, DataSource::File(PathBuf::from("local.csv")));
    }

    #[test]
    fn test_invalid_page_size_is_rejected() {
        assert!(Config::try_parse_from(["portage-list", "--page-size", "many"]).is_err());
    }
}
