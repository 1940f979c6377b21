use crate::error::{DocblockError, Result};
use serde::Deserialize;
use std::path::Path;

/// Name of the config file picked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "docblock.toml";

/// Layout knobs for rendering. Defaults match the conventional docblock
/// layout: 80 column text, tabs counted as 4 columns, `.php` sources.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub wrap_width: usize,
    pub tab_width: usize,
    pub extensions: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            wrap_width: 80,
            tab_width: 4,
            extensions: vec!["php".to_string()],
        }
    }
}

impl LayoutConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DocblockError::io(path, e))?;
        Self::from_toml(&content)
    }

    /// Explicit path first, then `./docblock.toml`, then defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let local = Path::new(CONFIG_FILE_NAME);
        if local.is_file() {
            tracing::debug!("Using config from {}", local.display());
            return Self::load(local);
        }

        Ok(Self::default())
    }

    pub fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = LayoutConfig::default();
        assert_eq!(cfg.wrap_width, 80);
        assert_eq!(cfg.tab_width, 4);
        assert!(cfg.accepts_extension(Path::new("src/Foo.php")));
        assert!(!cfg.accepts_extension(Path::new("src/foo.rs")));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg = LayoutConfig::from_toml("wrap_width = 100\n").expect("valid toml");
        assert_eq!(cfg.wrap_width, 100);
        assert_eq!(cfg.tab_width, 4);
        assert_eq!(cfg.extensions, vec!["php".to_string()]);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = LayoutConfig::from_toml("wrap_width = \"wide\"").unwrap_err();
        assert!(matches!(err, DocblockError::Config(_)));
    }
}
