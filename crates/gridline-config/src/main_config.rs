use crate::env_subst::substitute;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Top-level `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default)]
    pub style: StyleConfig,

    #[serde(default)]
    pub components: ComponentsConfig,

    #[serde(default)]
    pub multiline: MultilineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            style: StyleConfig::default(),
            components: ComponentsConfig::default(),
            multiline: MultilineConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default = "default_separator")]
    pub separator: String,

    /// None means "follow the terminal probe".
    #[serde(default)]
    pub color: Option<bool>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            color: None,
        }
    }
}

/// Segment order for the primary status line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentsConfig {
    #[serde(default = "default_order")]
    pub order: Vec<String>,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            order: default_order(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultilineConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Directory holding one TOML file per logical component. Relative
    /// paths resolve against the main config file's directory.
    #[serde(default)]
    pub components_dir: Option<String>,

    /// Explicit component list; None means "scan the directory".
    #[serde(default)]
    pub components: Option<Vec<String>>,

    #[serde(default = "default_cell_separator")]
    pub separator: String,
}

impl Default for MultilineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            components_dir: None,
            components: None,
            separator: default_cell_separator(),
        }
    }
}

fn default_theme() -> String {
    "classic".to_string()
}

fn default_separator() -> String {
    " | ".to_string()
}

fn default_cell_separator() -> String {
    "  ".to_string()
}

fn default_order() -> Vec<String> {
    vec![
        "model".to_string(),
        "directory".to_string(),
        "git".to_string(),
        "cost".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

/// Main config plus the non-fatal diagnostics produced while loading it.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<String>,
}

impl Config {
    /// Load the main config, expanding `${VAR}` placeholders in the raw
    /// text against the given environment snapshot. A missing file yields
    /// the defaults.
    pub fn load_from(path: &Path, env: &HashMap<String, String>) -> Result<LoadedConfig> {
        if !path.exists() {
            return Ok(LoadedConfig {
                config: Self::default(),
                warnings: Vec::new(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let substituted = substitute(&content, env);
        let config: Config = toml::from_str(&substituted.text)?;
        Ok(LoadedConfig {
            config,
            warnings: substituted.warnings,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Directory to load component files from: the configured one, or
    /// `components/` next to the main config file.
    pub fn components_dir(&self, config_path: &Path) -> PathBuf {
        let base = config_path.parent().unwrap_or_else(|| Path::new("."));
        match &self.multiline.components_dir {
            Some(dir) => {
                let dir = Path::new(dir);
                if dir.is_absolute() {
                    dir.to_path_buf()
                } else {
                    base.join(dir)
                }
            }
            None => base.join("components"),
        }
    }
}
