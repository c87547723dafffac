use crate::target::TargetId;
use dashmap::DashSet;

/// Targets that already received their resolved settings.
///
/// Each operation is atomic on its own, so the tracker can be shared
/// between threads. A check followed by a mark is not atomic as a pair;
/// two racing triggers may both resolve, which only costs a repeated scan.
#[derive(Debug, Default)]
pub struct AppliedTargets {
    applied: DashSet<TargetId>,
}

impl AppliedTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_apply(&self, id: TargetId) -> bool {
        !self.applied.contains(&id)
    }

    pub fn mark_applied(&self, id: TargetId) {
        self.applied.insert(id);
    }

    pub fn forget(&self, id: TargetId) {
        self.applied.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.applied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let tracker = AppliedTargets::new();
        let id = TargetId(7);
        assert!(tracker.is_empty());
        assert!(tracker.should_apply(id));

        tracker.mark_applied(id);
        tracker.mark_applied(id);
        assert!(!tracker.should_apply(id));
        assert_eq!(tracker.len(), 1);

        tracker.forget(id);
        assert!(tracker.should_apply(id));
        tracker.forget(id);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_targets_are_independent() {
        let tracker = AppliedTargets::new();
        tracker.mark_applied(TargetId(1));
        assert!(!tracker.should_apply(TargetId(1)));
        assert!(tracker.should_apply(TargetId(2)));
    }

    #[test]
    fn test_shared_across_threads() {
        let tracker = std::sync::Arc::new(AppliedTargets::new());
        let handles: Vec<_> = (0..8u64)
            .map(|i| {
                let tracker = tracker.clone();
                std::thread::spawn(move || {
                    tracker.mark_applied(TargetId(i % 4));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(tracker.len(), 4);
    }
}
