use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Stable identifier the host assigns to an open view.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct TargetId(pub u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host-side view of an open buffer that settings get applied to.
pub trait Target {
    fn id(&self) -> TargetId;

    /// Absolute path of the file shown, `None` for unsaved buffers.
    fn file_path(&self) -> Option<&Path>;

    /// Path of the declared syntax definition, e.g.
    /// `Packages/Python/Python.sublime-syntax`.
    fn syntax(&self) -> Option<&str>;

    fn setting(&self, key: &str) -> Option<&Value>;

    fn set_setting(&mut self, key: &str, value: Value);
}

/// Name used for syntax-specific settings files: the syntax definition's
/// file name without directory or extension.
pub fn syntax_name(syntax_path: &str) -> Option<String> {
    Path::new(syntax_path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_name_strips_directory_and_extension() {
        assert_eq!(
            syntax_name("Packages/Python/Python.sublime-syntax").as_deref(),
            Some("Python")
        );
        assert_eq!(
            syntax_name("Packages/Text/Plain text.tmLanguage").as_deref(),
            Some("Plain text")
        );
        assert_eq!(syntax_name("txt").as_deref(), Some("txt"));
    }

    #[test]
    fn test_syntax_name_of_nothing() {
        assert_eq!(syntax_name(""), None);
        assert_eq!(syntax_name("/"), None);
    }
}
