//! Coalescing of rapid zoom gestures into one settled refresh.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::generation::GenerationGuard;

/// Schedules a refresh for after a quiet period.
///
/// Every zoom event schedules its own delayed refresh; when a newer zoom
/// arrives inside the quiet period, the older task finds its generation
/// stale on wake-up and abandons the refresh silently. The net effect is
/// one refresh, bound to the last gesture's state, one quiet period after
/// the gesture stream goes idle.
#[derive(Debug, Clone)]
pub struct ZoomDebouncer {
    guard: GenerationGuard,
    settle: Duration,
}

impl ZoomDebouncer {
    pub fn new(settle: Duration) -> Self {
        Self {
            guard: GenerationGuard::new(),
            settle,
        }
    }

    /// The configured quiet period.
    pub fn settle(&self) -> Duration {
        self.settle
    }

    /// Note a zoom event and schedule `refresh` for after the quiet
    /// period. The task resolves `true` when the refresh ran and `false`
    /// when a newer zoom abandoned it.
    pub fn schedule<F, Fut>(&self, refresh: F) -> JoinHandle<bool>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = self.guard.begin();
        let settle = self.settle;
        tokio::spawn(async move {
            tokio::time::sleep(settle).await;
            if !token.is_current() {
                log::debug!("zoom #{} superseded before settling", token.id());
                return false;
            }
            refresh().await;
            true
        })
    }

    /// A discrete selection is already settled: invalidate any pending
    /// zoom refresh so it cannot fire behind the immediate one.
    pub fn interrupt(&self) {
        self.guard.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn counting_refresh(count: &Arc<AtomicU32>) -> impl FnOnce() -> std::future::Ready<()> {
        let count = Arc::clone(count);
        move || {
            count.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_zoom_fires_after_quiet_period() {
        let debouncer = ZoomDebouncer::new(Duration::from_millis(100));
        let fired = Arc::new(AtomicU32::new(0));

        let handle = debouncer.schedule(counting_refresh(&fired));
        assert!(handle.await.unwrap());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_zooms_coalesce_to_last() {
        let debouncer = ZoomDebouncer::new(Duration::from_millis(100));
        let fired = Arc::new(AtomicU32::new(0));

        let first = debouncer.schedule(counting_refresh(&fired));
        tokio::time::sleep(Duration::from_millis(30)).await;
        let second = debouncer.schedule(counting_refresh(&fired));
        tokio::time::sleep(Duration::from_millis(30)).await;
        let third = debouncer.schedule(counting_refresh(&fired));

        assert!(!first.await.unwrap());
        assert!(!second.await.unwrap());
        assert!(third.await.unwrap());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_abandons_pending_refresh() {
        let debouncer = ZoomDebouncer::new(Duration::from_millis(100));
        let fired = Arc::new(AtomicU32::new(0));

        let handle = debouncer.schedule(counting_refresh(&fired));
        tokio::time::sleep(Duration::from_millis(10)).await;
        debouncer.interrupt();

        assert!(!handle.await.unwrap());
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_zooms_fire_independently() {
        let debouncer = ZoomDebouncer::new(Duration::from_millis(100));
        let fired = Arc::new(AtomicU32::new(0));

        let first = debouncer.schedule(counting_refresh(&fired));
        assert!(first.await.unwrap());

        let second = debouncer.schedule(counting_refresh(&fired));
        assert!(second.await.unwrap());
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }
}
