use crate::domain::Preferences;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_PREFERENCES_FILE: &str = "portage-list.json";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("invalid preferences file - {0}")]
    Format(#[from] serde_json::Error),
}

pub struct PreferencesRepository;

impl PreferencesRepository {
    pub fn save(preferences: &Preferences, path: &Path) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(preferences)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Preferences, PersistenceError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str::<Preferences>(&content)?)
    }

    /// Loads preferences, falling back to defaults when the file is absent
    /// or unreadable.
    pub fn load_or_default(path: &Path) -> Preferences {
        match Self::load(path) {
            Ok(preferences) => preferences,
            Err(PersistenceError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Preferences::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring preferences file");
                Preferences::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Theme;
    use tempfile::tempdir;

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_PREFERENCES_FILE);
        PreferencesRepository::save(&Preferences { theme: Theme::Light }, &path).unwrap();
        let loaded = PreferencesRepository::load(&path).unwrap();
        assert_eq!(loaded.theme, Theme::Light);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(PreferencesRepository::load(&path), Err(PersistenceError::Io(_))));
        assert_eq!(PreferencesRepository::load_or_default(&path), Preferences::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(PreferencesRepository::load(&path), Err(PersistenceError::Format(_))));
        assert_eq!(PreferencesRepository::load_or_default(&path), Preferences::default());
    }
}
