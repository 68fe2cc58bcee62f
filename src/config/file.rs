//! Option file loading and discovery.
//!
//! Supports loading diff options from YAML files with automatic discovery.

use super::types::OptionsFile;
use std::path::{Path, PathBuf};

// ============================================================================
// Option File Discovery
// ============================================================================

/// Standard option file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".keyed-diff.yaml",
    ".keyed-diff.yml",
    "keyed-diff.yaml",
    "keyed-diff.yml",
];

/// Discover an option file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/keyed-diff/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    if let Some(path) =
        dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("keyed-diff")))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find an option file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }

        current = current.parent()?;
    }
}

// ============================================================================
// Option File Loading
// ============================================================================

/// Error type for option file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `OptionsFile` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<OptionsFile, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    // An empty file is a valid, all-defaults option file
    if content.trim().is_empty() {
        return Ok(OptionsFile::default());
    }
    let options: OptionsFile = serde_yaml::from_str(&content)?;
    Ok(options)
}

/// Load options from a discovered file, or return defaults.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (OptionsFile, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (OptionsFile::default(), None),
        |path| match load_config_file(&path) {
            Ok(options) => (options, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load options from {}: {}", path.display(), e);
                (OptionsFile::default(), None)
            }
        },
    )
}

// ============================================================================
// Option Merging
// ============================================================================

impl OptionsFile {
    /// Merge another set of options into this one, with `other` taking precedence.
    ///
    /// Used to layer CLI flags over file settings.
    pub fn merge(&mut self, other: &Self) {
        if other.key.is_some() {
            self.key.clone_from(&other.key);
        }
        if other.detector.is_some() {
            self.detector.clone_from(&other.detector);
        }
        if other.fields.is_some() {
            self.fields.clone_from(&other.fields);
        }
        if other.is_split.is_some() {
            self.is_split = other.is_split;
        }
        if other.sort {
            self.sort = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut options, loaded_from) = load_or_default(config_path);
        options.merge(cli_overrides);
        (options, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example option file.
#[must_use]
pub fn generate_example_config() -> String {
    let example = OptionsFile {
        key: Some(super::defaults::DEFAULT_KEY.to_string()),
        detector: Some(super::defaults::DEFAULT_DETECTOR.to_string()),
        fields: Some(
            super::CountFields::all()
                .names()
                .into_iter()
                .map(String::from)
                .collect(),
        ),
        is_split: Some(super::defaults::DEFAULT_IS_SPLIT),
        sort: false,
    };
    format!(
        r"# keyed-diff options
# Place this file at .keyed-diff.yaml in your project root or ~/.config/keyed-diff/
# CLI flags always override file settings.
#
# detector: fieldwise | whole-record | never
# sort: true reports unchanged keys and whether the key order changed

{}",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".keyed-diff.yaml");
        std::fs::write(&config_path, "key: sku\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("options.yaml");

        let yaml = r#"
key: sku
detector: whole-record
fields: [addedCount, deletedCount]
is_split: false
sort: true
"#;
        std::fs::write(&config_path, yaml).unwrap();

        let options = load_config_file(&config_path).unwrap();
        assert_eq!(options.key.as_deref(), Some("sku"));
        assert_eq!(options.detector.as_deref(), Some("whole-record"));
        assert_eq!(
            options.fields,
            Some(vec!["addedCount".to_string(), "deletedCount".to_string()])
        );
        assert_eq!(options.is_split, Some(false));
        assert!(options.sort);
    }

    #[test]
    fn test_load_empty_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("empty.yaml");
        std::fs::write(&config_path, "\n").unwrap();

        assert_eq!(load_config_file(&config_path).unwrap(), OptionsFile::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/options.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "is_split: [not, a, bool]\n").unwrap();

        let result = load_config_file(&config_path);
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let mut base = OptionsFile {
            key: Some("id".to_string()),
            detector: Some("fieldwise".to_string()),
            ..OptionsFile::default()
        };
        let overrides = OptionsFile {
            key: Some("sku".to_string()),
            is_split: Some(false),
            sort: true,
            ..OptionsFile::default()
        };

        base.merge(&overrides);

        assert_eq!(base.key.as_deref(), Some("sku"));
        assert_eq!(base.detector.as_deref(), Some("fieldwise"));
        assert_eq!(base.is_split, Some(false));
        assert!(base.sort);
    }

    #[test]
    fn test_generate_example_config_parses() {
        let example = generate_example_config();
        assert!(example.contains("key: id"));
        let parsed: OptionsFile = serde_yaml::from_str(&example).unwrap();
        assert_eq!(parsed.detector.as_deref(), Some("fieldwise"));
        assert_eq!(parsed.fields.map(|f| f.len()), Some(3));
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-options.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "key: sku").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }

    #[test]
    fn test_from_file_with_overrides() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("options.yaml");
        std::fs::write(&config_path, "key: sku\ndetector: never\n").unwrap();

        let overrides = OptionsFile {
            detector: Some("whole-record".to_string()),
            ..OptionsFile::default()
        };
        let (options, loaded_from) =
            OptionsFile::from_file_with_overrides(Some(&config_path), &overrides);

        assert_eq!(loaded_from, Some(config_path));
        assert_eq!(options.key.as_deref(), Some("sku"));
        assert_eq!(options.detector.as_deref(), Some("whole-record"));
    }
}
