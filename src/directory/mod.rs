//! Café directory module
//!
//! Process-wide, read-only mapping from city name to an ordered list of café
//! names. Built once at startup (either the built-in dataset or a TOML file
//! named in the configuration) and shared by reference afterward.

use std::collections::HashMap;

use crate::config::DirectoryConfig;

/// Errors raised while building the directory at startup
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("failed to read directory file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse directory file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Immutable café directory
///
/// City keys are lower-case by convention; lookups are case-sensitive.
#[derive(Debug, Clone)]
pub struct CafeDirectory {
    cities: HashMap<String, Vec<String>>,
}

impl CafeDirectory {
    /// Build the directory according to configuration
    pub fn from_config(cfg: &DirectoryConfig) -> Result<Self, DirectoryError> {
        match &cfg.file {
            Some(path) => Self::from_file(path),
            None => Ok(Self::built_in()),
        }
    }

    /// The built-in dataset used when no directory file is configured
    pub fn built_in() -> Self {
        let cities = HashMap::from([
            (
                "moscow".to_string(),
                vec![
                    "Мир кофе".to_string(),
                    "Сытый студент".to_string(),
                    "Кофе и ложка".to_string(),
                    "Вилка и ложка".to_string(),
                ],
            ),
            (
                "tula".to_string(),
                vec![
                    "Тульский пряник".to_string(),
                    "Блинная №1".to_string(),
                    "Кафе на набережной".to_string(),
                ],
            ),
            (
                "spb".to_string(),
                vec![
                    "Кофейня на Невском".to_string(),
                    "Буше".to_string(),
                    "Пышечная".to_string(),
                ],
            ),
        ]);
        Self { cities }
    }

    /// Load the directory from a TOML file
    ///
    /// The file is a flat table of `city = ["name", ...]` entries.
    pub fn from_file(path: &str) -> Result<Self, DirectoryError> {
        let text = std::fs::read_to_string(path).map_err(|source| DirectoryError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::parse(&text).map_err(|source| DirectoryError::Parse {
            path: path.to_string(),
            source,
        })
    }

    fn parse(text: &str) -> Result<Self, toml::de::Error> {
        let cities: HashMap<String, Vec<String>> = toml::from_str(text)?;
        Ok(Self { cities })
    }

    /// Look up a city's café list (case-sensitive)
    pub fn get(&self, city: &str) -> Option<&[String]> {
        self.cities.get(city).map(Vec::as_slice)
    }

    /// Number of cities in the directory
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_cities() {
        let dir = CafeDirectory::built_in();
        assert!(dir.get("moscow").is_some());
        assert!(dir.get("tula").is_some());
        assert!(dir.get("omsk").is_none());
        // Lookup is case-sensitive
        assert!(dir.get("Moscow").is_none());
    }

    #[test]
    fn test_built_in_moscow_dataset() {
        let dir = CafeDirectory::built_in();
        let moscow = dir.get("moscow").unwrap();

        let matches = |term: &str| {
            moscow
                .iter()
                .filter(|name| name.to_lowercase().contains(term))
                .count()
        };

        assert_eq!(matches("кофе"), 2);
        assert_eq!(matches("вилка"), 1);
        assert_eq!(matches("фасоль"), 0);
        assert!(matches("ложка") >= 1);
        assert!(moscow.len() >= 2);
    }

    #[test]
    fn test_parse_toml_table() {
        let dir = CafeDirectory::parse(
            r#"
            moscow = ["Мир кофе", "Сытый студент"]
            tula = ["Блинная"]
            "#,
        )
        .unwrap();

        assert_eq!(dir.city_count(), 2);
        assert_eq!(
            dir.get("moscow").unwrap(),
            ["Мир кофе".to_string(), "Сытый студент".to_string()]
        );
    }

    #[test]
    fn test_parse_rejects_malformed_toml() {
        assert!(CafeDirectory::parse("moscow = 42").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = CafeDirectory::from_file("/nonexistent/cafes.toml").unwrap_err();
        assert!(matches!(err, DirectoryError::Read { .. }));
    }
}
