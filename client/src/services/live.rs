//! # Live Queries
//!
//! A view that must stay fresh (a leaderboard, an active campaign) gets an
//! explicit timer: fetch immediately, then once per period, replacing the
//! published value each time. The refresh task lives exactly as long as the
//! [`LiveQuery`] handle; dropping the handle cancels it.

use std::future::Future;
use std::time::Duration;

use lib_core::Result;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

use super::reads::Loadable;

pub struct LiveQuery<T> {
    name: &'static str,
    rx: watch::Receiver<Loadable<T>>,
    task: JoinHandle<()>,
}

impl<T> LiveQuery<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawn the refresh loop on the current tokio runtime.
    ///
    /// A failed refresh keeps the last loaded value; a failure before any
    /// successful load publishes [`Loadable::Failed`].
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, mut fetch: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(Loadable::Loading);

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match fetch().await {
                    Ok(value) => {
                        debug!(query = name, "Live query refreshed");
                        tx.send_replace(Loadable::Loaded(value));
                    }
                    Err(e) => {
                        warn!(query = name, error = %e, "Live query refresh failed, keeping last value");
                        tx.send_if_modified(|current| {
                            if current.value().is_some() {
                                false
                            } else {
                                *current = Loadable::Failed(e.user_message());
                                true
                            }
                        });
                    }
                }
            }
        });

        Self { name, rx, task }
    }

    /// Latest published value.
    pub fn current(&self) -> Loadable<T> {
        self.rx.borrow().clone()
    }

    /// Independent receiver for another consumer of the same view.
    pub fn subscribe(&self) -> watch::Receiver<Loadable<T>> {
        self.rx.clone()
    }

    /// Wait for the next published value and return it.
    pub async fn next(&mut self) -> Loadable<T> {
        if self.rx.changed().await.is_err() {
            // Sender gone: the task ended, the current value is final.
            return self.current();
        }
        self.rx.borrow_and_update().clone()
    }
}

impl<T> Drop for LiveQuery<T> {
    fn drop(&mut self) {
        debug!(query = self.name, "Live query dropped, cancelling refresh");
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_core::AppError;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_refreshes_every_period() {
        let calls = Arc::new(AtomicU64::new(0));
        let mut query = LiveQuery::spawn("counter", Duration::from_secs(15), {
            let calls = calls.clone();
            move || {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move { Ok(n) }
            }
        });

        assert_eq!(query.next().await, Loadable::Loaded(1));
        assert_eq!(query.next().await, Loadable::Loaded(2));
        assert_eq!(query.current(), Loadable::Loaded(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_last_value() {
        let calls = Arc::new(AtomicU64::new(0));
        let mut query = LiveQuery::spawn("flaky", Duration::from_secs(1), {
            let calls = calls.clone();
            move || {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    match n {
                        1 => Err(AppError::Adapter("timeout".to_string())),
                        3 => Err(AppError::Adapter("timeout".to_string())),
                        n => Ok(n),
                    }
                }
            }
        });

        assert_eq!(
            query.next().await,
            Loadable::Failed("Network temporarily unavailable, please retry".to_string())
        );
        assert_eq!(query.next().await, Loadable::Loaded(2));
        // The third fetch fails silently; the next published value is the fourth.
        assert_eq!(query.next().await, Loadable::Loaded(4));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_refresh() {
        let calls = Arc::new(AtomicU64::new(0));
        let mut query = LiveQuery::spawn("cancelled", Duration::from_secs(5), {
            let calls = calls.clone();
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(()) }
            }
        });

        query.next().await;
        drop(query);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
