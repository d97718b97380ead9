//! One-shot cancellable timers.
//!
//! The spin controller never sleeps itself; it asks a [`TimerScheduler`] to
//! run a callback later and keeps the returned handle so it can cancel it.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;

/// Identifies one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

pub trait TimerScheduler: Send + Sync {
    /// Run `callback` once after `delay`.
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;

    /// Cancel a pending callback. Unknown or already-fired handles are ignored.
    fn cancel(&self, handle: TimerHandle);
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Timers backed by tasks on a tokio runtime.
pub struct TokioScheduler {
    runtime: Handle,
    next_id: AtomicU64,
    tasks: Arc<Mutex<HashMap<u64, AbortHandle>>>,
}

impl TokioScheduler {
    #[must_use]
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            next_id: AtomicU64::new(1),
            tasks: Arc::default(),
        }
    }

    /// Scheduler on the runtime of the calling context, if there is one.
    #[must_use]
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    /// Number of timers that have neither fired nor been cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        lock(&self.tasks).len()
    }
}

impl fmt::Debug for TokioScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokioScheduler")
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

impl TimerScheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let tasks = Arc::clone(&self.tasks);

        // Hold the map while spawning so the task cannot look itself up
        // before its abort handle is registered.
        let mut guard = lock(&self.tasks);
        let join = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let live = lock(&tasks).remove(&id).is_some();
            if live {
                callback();
            }
        });
        guard.insert(id, join.abort_handle());
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        if let Some(task) = lock(&self.tasks).remove(&handle.0) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in lock(&self.tasks).drain() {
            task.abort();
        }
    }
}

struct ManualTimer {
    id: u64,
    deadline: Duration,
    callback: TimerCallback,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    timers: Vec<ManualTimer>,
    fired: usize,
}

/// Scheduler driven by a virtual clock; timers only fire from [`advance`].
///
/// [`advance`]: ManualScheduler::advance
#[derive(Default)]
pub struct ManualScheduler {
    state: Mutex<ManualState>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the virtual clock forward and fire every timer that came due, in
    /// deadline order.
    pub fn advance(&self, delta: Duration) {
        let target = lock(&self.state).now + delta;
        loop {
            let due = {
                let mut state = lock(&self.state);
                let next = state
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.deadline <= target)
                    .min_by_key(|(_, timer)| (timer.deadline, timer.id))
                    .map(|(idx, _)| idx);
                match next {
                    Some(idx) => {
                        let timer = state.timers.remove(idx);
                        state.now = timer.deadline;
                        state.fired += 1;
                        Some(timer.callback)
                    }
                    None => {
                        state.now = target;
                        None
                    }
                }
            };
            match due {
                Some(callback) => callback(),
                None => break,
            }
        }
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        lock(&self.state).now
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        lock(&self.state).timers.len()
    }

    /// Total callbacks run so far.
    #[must_use]
    pub fn fired(&self) -> usize {
        lock(&self.state).fired
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("ManualScheduler")
            .field("now", &state.now)
            .field("pending", &state.timers.len())
            .field("fired", &state.fired)
            .finish()
    }
}

impl TimerScheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let mut state = lock(&self.state);
        state.next_id += 1;
        let id = state.next_id;
        let deadline = state.now + delay;
        state.timers.push(ManualTimer {
            id,
            deadline,
            callback,
        });
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        lock(&self.state).timers.retain(|timer| timer.id != handle.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> TimerCallback) {
        let hits = Arc::new(AtomicUsize::new(0));
        let make = {
            let hits = Arc::clone(&hits);
            move || -> TimerCallback {
                let hits = Arc::clone(&hits);
                Box::new(move || {
                    hits.fetch_add(1, Ordering::SeqCst);
                })
            }
        };
        (hits, make)
    }

    #[test]
    fn manual_fires_only_when_due() {
        let scheduler = ManualScheduler::new();
        let (hits, make) = counter();
        scheduler.schedule(Duration::from_millis(100), make());

        scheduler.advance(Duration::from_millis(99));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.now(), Duration::from_millis(100));
    }

    #[test]
    fn manual_cancel_drops_timer() {
        let scheduler = ManualScheduler::new();
        let (hits, make) = counter();
        let handle = scheduler.schedule(Duration::from_millis(10), make());
        scheduler.cancel(handle);
        scheduler.cancel(handle);
        scheduler.advance(Duration::from_secs(1));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.fired(), 0);
    }

    #[test]
    fn manual_fires_in_deadline_order() {
        let scheduler = ManualScheduler::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for (label, ms) in [("late", 30_u64), ("early", 10), ("mid", 20)] {
            let order = Arc::clone(&order);
            scheduler.schedule(
                Duration::from_millis(ms),
                Box::new(move || lock(&order).push(label)),
            );
        }
        scheduler.advance(Duration::from_millis(50));
        assert_eq!(*lock(&order), vec!["early", "mid", "late"]);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_timer_fires_after_delay() {
        let scheduler = TokioScheduler::try_current().expect("runtime");
        let (hits, make) = counter();
        scheduler.schedule(Duration::from_millis(500), make());
        assert_eq!(scheduler.pending(), 1);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_cancel_prevents_callback() {
        let scheduler = TokioScheduler::try_current().expect("runtime");
        let (hits, make) = counter();
        let handle = scheduler.schedule(Duration::from_millis(500), make());
        scheduler.cancel(handle);
        assert_eq!(scheduler.pending(), 0);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
