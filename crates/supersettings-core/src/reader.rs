use crate::error::SettingsError;
use serde_json::Value;
use std::path::Path;

/// Top-level settings keys and their values, exactly as found on disk.
pub type SettingsMapping = serde_json::Map<String, Value>;

/// Something that can produce the mapping stored at a candidate path.
///
/// Implementations must not fail: a path that cannot contribute settings
/// yields an empty mapping.
pub trait SettingsSource {
    fn read(&self, path: &Path) -> SettingsMapping;
}

/// Reads settings files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileReader;

impl FileReader {
    /// Load a settings file. `Ok(None)` means there is no regular file at `path`.
    pub fn try_read(&self, path: &Path) -> Result<Option<SettingsMapping>, SettingsError> {
        if !path.is_file() {
            return Ok(None);
        }

        tracing::info!("loading settings from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value =
            serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        match value {
            Value::Object(mapping) => Ok(Some(mapping)),
            other => Err(SettingsError::NotAMapping {
                path: path.to_path_buf(),
                found: json_kind(&other),
            }),
        }
    }
}

impl SettingsSource for FileReader {
    fn read(&self, path: &Path) -> SettingsMapping {
        match self.try_read(path) {
            Ok(Some(mapping)) => mapping,
            Ok(None) => SettingsMapping::new(),
            Err(e) => {
                tracing::warn!(
                    "error loading settings from {}: {}",
                    e.path().display(),
                    e
                );
                SettingsMapping::new()
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
