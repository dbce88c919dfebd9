use anyhow::{Context, Result};
use proseline_schema::Theme;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "proseline.config.json";

/// Proseline configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory containing document `.json` files
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Where rendered emails go (defaults to `dist`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,

    #[serde(default)]
    pub theme: Theme,

    /// Pretty print the email document shell
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_src_dir() -> String {
    "documents".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Config {
    /// Load config from a directory, falling back to defaults when absent
    pub fn load(cwd: &Path) -> Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Cannot read {}", config_path.display()))?;
            let config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn get_src_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.src_dir)
    }

    pub fn get_out_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(self.out_dir.as_deref().unwrap_or("dist"))
    }

    /// The config theme, or the theme file given on the command line
    pub fn resolve_theme(&self, theme_file: Option<&Path>) -> Result<Theme> {
        match theme_file {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Cannot read theme {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Invalid theme {}", path.display()))
            }
            None => Ok(self.theme.clone()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: None,
            theme: Theme::default(),
            pretty: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let json = r##"{
            "srcDir": "emails",
            "outDir": "build",
            "theme": { "primaryColor": "#ff0000", "fontFamily": "Georgia, serif" },
            "pretty": false
        }"##;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.src_dir, "emails");
        assert_eq!(config.out_dir.as_deref(), Some("build"));
        assert_eq!(config.theme.primary_color, "#ff0000");
        assert_eq!(config.theme.font_family(), "Georgia, serif");
        assert_eq!(config.theme.text_color(), "#1a1a1a");
        assert!(!config.pretty);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.get_out_dir(dir.path()), dir.path().join("dist"));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r##"{ "srcDir": "docs", "theme": { "primaryColor": "#00aa00" } }"##,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.get_src_dir(dir.path()), dir.path().join("docs"));
        assert_eq!(config.theme.primary_color, "#00aa00");
        assert!(config.pretty);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ srcDir: }").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn test_theme_file_overrides_config() {
        let dir = TempDir::new().unwrap();
        let theme_path = dir.path().join("brand.json");
        std::fs::write(&theme_path, r##"{ "primaryColor": "#123456" }"##).unwrap();

        let config = Config::default();
        assert_eq!(config.resolve_theme(None).unwrap(), Theme::default());
        assert_eq!(
            config.resolve_theme(Some(&theme_path)).unwrap().primary_color,
            "#123456"
        );
    }
}
