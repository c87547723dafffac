use std::path::PathBuf;

/// Why a settings file could not contribute. `Display` gives only the cause;
/// the offending file is available through [`SettingsError::path`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read file: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed, but its top level is not an object.
    #[error("expected a settings object, found {found}")]
    NotAMapping { path: PathBuf, found: &'static str },
}

impl SettingsError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            SettingsError::Io { path, .. }
            | SettingsError::Parse { path, .. }
            | SettingsError::NotAMapping { path, .. } => path,
        }
    }
}
