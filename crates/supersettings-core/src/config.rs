use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: SettingsLayout,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Naming convention for the settings files looked up in each directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsLayout {
    #[serde(default = "default_general_name")]
    pub general_name: String,
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for SettingsLayout {
    fn default() -> Self {
        Self {
            general_name: default_general_name(),
            extension: default_extension(),
        }
    }
}

impl SettingsLayout {
    /// File name of the settings file shared by every syntax.
    pub fn general_file(&self) -> String {
        format!("{}.{}", self.general_name, self.extension)
    }

    pub fn syntax_file(&self, syntax: &str) -> String {
        format!("{}.{}", syntax, self.extension)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            dir: None,
        }
    }
}

fn default_general_name() -> String {
    "Preferences".into()
}
fn default_extension() -> String {
    "sublime-settings".into()
}
fn default_log_filter() -> String {
    "info".into()
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
