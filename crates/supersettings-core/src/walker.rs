//! Upward directory traversal.
//!
//! Starting from a directory, yields it and every ancestor up to and
//! including the filesystem root.

use std::path::{Component, Path, PathBuf};

/// A directory on the way from the target's directory up to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLevel {
    pub path: PathBuf,
    /// 0 for the starting directory, growing by one per parent.
    pub distance: usize,
}

/// Lazily walks from `start` to the filesystem root, closest directory first.
///
/// The path is made absolute and lexically normalized before walking, so
/// `..` segments can never send the walk back down the tree. Each call
/// returns a fresh iterator.
pub fn walk(start: impl AsRef<Path>) -> Ancestors {
    Ancestors {
        next: Some(normalize(start.as_ref())),
        distance: 0,
    }
}

#[derive(Debug)]
pub struct Ancestors {
    next: Option<PathBuf>,
    distance: usize,
}

impl Iterator for Ancestors {
    type Item = DirectoryLevel;

    fn next(&mut self) -> Option<DirectoryLevel> {
        let current = self.next.take()?;
        // The root is the only normalized path without a parent.
        self.next = current.parent().map(Path::to_path_buf);

        let level = DirectoryLevel {
            path: current,
            distance: self.distance,
        };
        self.distance += 1;
        Some(level)
    }
}

impl std::iter::FusedIterator for Ancestors {}

fn normalize(path: &Path) -> PathBuf {
    // `Path::parent` of a bare file name is the empty path.
    let path = if path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        path
    };
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` on a bare root is a no-op, which is what `/..` means.
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
