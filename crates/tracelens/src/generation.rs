//! Monotone generation tokens for suppressing stale completions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Issues monotonically increasing generations for one operation class.
///
/// Starting a new operation invalidates every token issued before it. An
/// in-flight completion re-checks its token at apply time and is discarded
/// when a newer operation of the same class has started since — the
/// ordering guarantee is last-issued-wins, not last-arrived-wins.
#[derive(Debug, Clone, Default)]
pub struct GenerationGuard {
    current: Arc<AtomicU64>,
}

impl GenerationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new operation, invalidating all earlier tokens.
    pub fn begin(&self) -> Generation {
        let id = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        Generation {
            id,
            current: Arc::clone(&self.current),
        }
    }

    /// Invalidate all outstanding tokens without handing out a new one.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

/// Token captured at the start of one operation.
#[derive(Debug, Clone)]
pub struct Generation {
    id: u64,
    current: Arc<AtomicU64>,
}

impl Generation {
    /// True while no newer operation of the same class has started.
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.id
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_is_current() {
        let guard = GenerationGuard::new();
        let token = guard.begin();
        assert!(token.is_current());
    }

    #[test]
    fn test_newer_operation_invalidates_older_token() {
        let guard = GenerationGuard::new();
        let first = guard.begin();
        let second = guard.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert!(second.id() > first.id());
    }

    #[test]
    fn test_invalidate_without_new_token() {
        let guard = GenerationGuard::new();
        let token = guard.begin();
        guard.invalidate();
        assert!(!token.is_current());
    }

    #[test]
    fn test_guards_are_independent() {
        let chart = GenerationGuard::new();
        let zoom = GenerationGuard::new();
        let chart_token = chart.begin();
        zoom.begin();
        zoom.begin();
        assert!(chart_token.is_current());
    }
}
