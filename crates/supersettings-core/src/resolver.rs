//! Precedence-ordered lookup and merging of settings files.
//!
//! Every directory from the target's own up to the root has two candidate
//! files: the syntax-specific one and the general one. Candidates are
//! visited closest directory first and syntax-specific before general;
//! the first value seen for a key wins. Merging is shallow, so a nested
//! object found closer to the target fully shadows one found farther out.

use crate::config::SettingsLayout;
use crate::reader::{FileReader, SettingsMapping, SettingsSource};
use crate::walker::walk;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One settings file that may contribute to a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    /// Position in the overall precedence order; 0 is the highest priority.
    pub rank: usize,
    /// Distance of the containing directory from the target's directory.
    pub distance: usize,
    pub syntax_specific: bool,
}

/// Result of a resolution, with the file each setting came from.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub settings: SettingsMapping,
    /// Winning candidate for every key in `settings`.
    pub origins: BTreeMap<String, CandidateFile>,
    /// Candidates that contributed at least one entry before merging, in
    /// precedence order. Missing, malformed and empty files are left out.
    pub sources: Vec<CandidateFile>,
}

impl Resolution {
    pub fn into_mapping(self) -> SettingsMapping {
        self.settings
    }

    pub fn origin(&self, key: &str) -> Option<&CandidateFile> {
        self.origins.get(key)
    }

    fn absorb(&mut self, mapping: SettingsMapping, candidate: &CandidateFile) {
        if mapping.is_empty() {
            return;
        }
        for key in merge_missing(&mut self.settings, mapping) {
            self.origins.insert(key, candidate.clone());
        }
        self.sources.push(candidate.clone());
    }
}

/// Copy into `acc` every entry of `fresh` whose key `acc` does not have yet.
///
/// Returns the keys that were inserted. Existing values are never replaced.
pub fn merge_missing(acc: &mut SettingsMapping, fresh: SettingsMapping) -> Vec<String> {
    let mut inserted = Vec::new();
    for (key, value) in fresh {
        if acc.contains_key(&key) {
            continue;
        }
        inserted.push(key.clone());
        acc.insert(key, value);
    }
    inserted
}

/// Resolves the effective settings for a directory and syntax.
#[derive(Debug, Clone, Default)]
pub struct PriorityResolver<S = FileReader> {
    layout: SettingsLayout,
    source: S,
}

impl PriorityResolver<FileReader> {
    pub fn new(layout: SettingsLayout) -> Self {
        Self::with_source(layout, FileReader)
    }
}

impl<S: SettingsSource> PriorityResolver<S> {
    pub fn with_source(layout: SettingsLayout, source: S) -> Self {
        Self { layout, source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Candidate files for `dir` in precedence order, highest first.
    ///
    /// Without a directory there are no candidates. Without a syntax name
    /// only the general file is listed at each level.
    pub fn candidates<'a>(
        &'a self,
        dir: Option<&Path>,
        syntax: Option<&'a str>,
    ) -> impl Iterator<Item = CandidateFile> + 'a {
        let syntax = syntax.filter(|s| !s.is_empty());
        let general = self.layout.general_file();

        dir.map(walk)
            .into_iter()
            .flatten()
            .flat_map(move |level| {
                let syntax_file = syntax.map(|name| CandidateFile {
                    path: level.path.join(self.layout.syntax_file(name)),
                    rank: level.distance * 2,
                    distance: level.distance,
                    syntax_specific: true,
                });
                let general_file = CandidateFile {
                    path: level.path.join(&general),
                    rank: level.distance * 2 + 1,
                    distance: level.distance,
                    syntax_specific: false,
                };
                syntax_file.into_iter().chain(std::iter::once(general_file))
            })
    }

    pub fn resolve(&self, dir: Option<&Path>, syntax: Option<&str>) -> SettingsMapping {
        self.resolve_traced(dir, syntax).into_mapping()
    }

    pub fn resolve_traced(&self, dir: Option<&Path>, syntax: Option<&str>) -> Resolution {
        let mut resolution = Resolution::default();
        for candidate in self.candidates(dir, syntax) {
            let mapping = self.source.read(&candidate.path);
            resolution.absorb(mapping, &candidate);
        }
        resolution
    }
}
