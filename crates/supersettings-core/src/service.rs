//! Entry points the host wires to its view lifecycle events.

use crate::config::{Config, SettingsLayout};
use crate::reader::{FileReader, SettingsMapping, SettingsSource};
use crate::resolver::PriorityResolver;
use crate::target::{syntax_name, Target, TargetId};
use crate::tracker::AppliedTargets;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// View lifecycle notifications delivered by the host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HostEvent {
    #[serde(rename = "load")]
    Loaded,
    #[serde(rename = "save")]
    Saved,
    #[serde(rename = "close")]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Settings were applied earlier and the target has not been closed since.
    AlreadyApplied,
    /// The target has no file yet. It stays eligible so a later save applies.
    NoFile,
    Applied { keys: usize },
    /// The event did not ask for settings to be applied.
    Forgotten,
}

/// Applies directory-scoped settings to targets, once per target.
///
/// Owns the record of configured targets; create one per host session.
#[derive(Debug, Default)]
pub struct SuperSettings<S = FileReader> {
    resolver: PriorityResolver<S>,
    applied: AppliedTargets,
}

impl SuperSettings<FileReader> {
    pub fn new(layout: SettingsLayout) -> Self {
        Self::with_resolver(PriorityResolver::new(layout))
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.layout.clone())
    }
}

impl<S: SettingsSource> SuperSettings<S> {
    pub fn with_resolver(resolver: PriorityResolver<S>) -> Self {
        Self {
            resolver,
            applied: AppliedTargets::new(),
        }
    }

    pub fn resolver(&self) -> &PriorityResolver<S> {
        &self.resolver
    }

    pub fn applied(&self) -> &AppliedTargets {
        &self.applied
    }

    /// Effective settings for `target`, ignoring whether they were applied.
    pub fn resolve_for<T: Target + ?Sized>(&self, target: &T) -> SettingsMapping {
        let dir = target.file_path().and_then(Path::parent);
        let syntax = target.syntax().and_then(syntax_name);
        self.resolver.resolve(dir, syntax.as_deref())
    }

    pub fn apply_if_needed<T: Target + ?Sized>(&self, target: &mut T) -> ApplyOutcome {
        let id = target.id();
        if !self.applied.should_apply(id) {
            return ApplyOutcome::AlreadyApplied;
        }
        if target.file_path().is_none() {
            tracing::debug!(target_id = %id, "no file yet, skipping settings");
            return ApplyOutcome::NoFile;
        }

        let settings = self.resolve_for(target);
        let keys = settings.len();
        for (key, value) in settings {
            target.set_setting(&key, value);
        }
        self.applied.mark_applied(id);

        tracing::debug!(target_id = %id, keys, "settings applied");
        ApplyOutcome::Applied { keys }
    }

    pub fn on_load<T: Target + ?Sized>(&self, target: &mut T) -> ApplyOutcome {
        self.apply_if_needed(target)
    }

    /// Covers files created in the editor, which only get a path once saved.
    pub fn on_post_save<T: Target + ?Sized>(&self, target: &mut T) -> ApplyOutcome {
        self.apply_if_needed(target)
    }

    pub fn on_close(&self, id: TargetId) {
        self.applied.forget(id);
    }

    pub fn handle<T: Target + ?Sized>(&self, event: HostEvent, target: &mut T) -> ApplyOutcome {
        match event {
            HostEvent::Loaded => self.on_load(target),
            HostEvent::Saved => self.on_post_save(target),
            HostEvent::Closed => {
                self.on_close(target.id());
                ApplyOutcome::Forgotten
            }
        }
    }

    /// Apply settings to targets that were opened before this service existed.
    /// Returns how many targets received settings.
    pub fn on_startup<'a, T, I>(&self, targets: I) -> usize
    where
        T: Target + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut T>,
    {
        targets
            .into_iter()
            .map(|target| self.apply_if_needed(target))
            .filter(|outcome| matches!(outcome, ApplyOutcome::Applied { .. }))
            .count()
    }
}
