use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default name of the curated featured list, relative to the data root.
pub const DEFAULT_FEATURED_FILE: &str = "featured-restaurants.json";

/// One town's listing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TownSource {
    /// Display label stamped onto every restaurant read from `file`.
    pub town: String,
    /// Resource path relative to the data root.
    pub file: String,
}

impl TownSource {
    /// Generate a URL-safe slug from the town label (`"Old Saybrook"` → `"old-saybrook"`).
    #[must_use]
    pub fn slug(&self) -> String {
        self.town
            .to_lowercase()
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TownsFile {
    #[serde(default = "default_featured_file")]
    pub featured: String,
    pub towns: Vec<TownSource>,
}

fn default_featured_file() -> String {
    DEFAULT_FEATURED_FILE.to_string()
}

impl TownsFile {
    /// Look up a configured town by label, case-insensitively.
    #[must_use]
    pub fn find(&self, town: &str) -> Option<&TownSource> {
        let wanted = town.trim().to_lowercase();
        self.towns
            .iter()
            .find(|t| t.town.to_lowercase() == wanted || t.slug() == wanted)
    }
}

/// Load and validate the town source list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_towns(path: &Path) -> Result<TownsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TownsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let towns_file: TownsFile = serde_yaml::from_str(&content)?;

    validate_towns(&towns_file)?;

    Ok(towns_file)
}

fn validate_towns(towns_file: &TownsFile) -> Result<(), ConfigError> {
    if towns_file.featured.trim().is_empty() {
        return Err(ConfigError::Validation(
            "featured resource path must be non-empty".to_string(),
        ));
    }

    if towns_file.towns.is_empty() {
        return Err(ConfigError::Validation(
            "at least one town must be configured".to_string(),
        ));
    }

    let mut seen_towns = HashSet::new();
    let mut seen_files = HashSet::new();

    for source in &towns_file.towns {
        if source.town.trim().is_empty() {
            return Err(ConfigError::Validation(
                "town label must be non-empty".to_string(),
            ));
        }

        if source.file.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "town '{}' has an empty file path",
                source.town
            )));
        }

        if !seen_towns.insert(source.town.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate town: '{}'",
                source.town
            )));
        }

        if !seen_files.insert(source.file.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate town file: '{}' (from town '{}')",
                source.file, source.town
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "towns_test.rs"]
mod tests;
