//! Debounced trigger
//!
//! Wraps an action so that a burst of calls arriving within the quiet
//! interval collapses into one execution with the arguments of the last
//! call. Each call aborts the pending timer task and schedules a new one.
//!
//! Arguments of any arity travel as a single value; use a tuple for several.
//! Calls must happen inside a tokio runtime. A panic in the action stays in
//! its timer task and is reported by tokio like any other task panic.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

type Action<A> = dyn Fn(A) + Send + Sync + 'static;

struct Inner<A> {
    action: Box<Action<A>>,
    interval: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<A> Inner<A> {
    fn pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Callable returned by [`debounce`]
pub struct Debounced<A> {
    inner: Arc<Inner<A>>,
}

impl<A> Clone for Debounced<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Wrap `action` so it runs once per quiet period of `interval`
pub fn debounce<A, F>(action: F, interval: Duration) -> Debounced<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounced {
        inner: Arc::new(Inner {
            action: Box::new(action),
            interval,
            pending: Mutex::new(None),
        }),
    }
}

impl<A: Send + 'static> Debounced<A> {
    /// Cancel any pending execution and schedule one for now + interval
    pub fn call(&self, args: A) {
        let mut pending = self.inner.pending();
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let inner = Arc::clone(&self.inner);
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(inner.interval).await;
            tracing::trace!("Debounce interval elapsed");
            (inner.action)(args);
        }));
    }

    /// Drop the pending execution, if any
    pub fn cancel(&self) {
        if let Some(handle) = self.inner.pending().take() {
            handle.abort();
        }
    }

    /// True while a scheduled execution has not yet run
    pub fn is_pending(&self) -> bool {
        self.inner
            .pending()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    pub fn interval(&self) -> Duration {
        self.inner.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) + Send + Sync + 'static) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        (calls, move |n| sink.lock().unwrap().push(n))
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_last_call() {
        let (calls, action) = recorder();
        let debounced = debounce(action, Duration::from_millis(300));

        for n in 1..=5 {
            debounced.call(n);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(calls.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(*calls.lock().unwrap(), vec![5]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_call() {
        let (calls, action) = recorder();
        let debounced = debounce(action, Duration::from_millis(50));

        debounced.call(1);
        assert!(debounced.is_pending());
        debounced.cancel();
        assert!(!debounced.is_pending());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_still_defers() {
        let (calls, action) = recorder();
        let debounced = debounce(action, Duration::ZERO);

        debounced.call(7);
        assert!(calls.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(*calls.lock().unwrap(), vec![7]);
    }
}
