//! Cancellable periodic timer
//!
//! Runs a callback once per period on a tokio task until the callback
//! returns `false` or the [`CancellationToken`] fires. Dropping the handle
//! cancels the task, so a countdown never outlives its owner.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

pub struct Countdown;

impl Countdown {
    /// Start calling `on_tick` every `period`, first after one full period.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(period: Duration, mut on_tick: F) -> CountdownHandle
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let token = CancellationToken::new();
        let child = token.clone();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = child.cancelled() => {
                        tracing::debug!("Countdown cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        if !on_tick() {
                            tracing::debug!("Countdown finished");
                            break;
                        }
                    }
                }
            }
        });

        CountdownHandle { token, task }
    }
}

/// Owner of a running countdown
#[derive(Debug)]
pub struct CountdownHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl CountdownHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether the timer task has stopped, by cancellation or on its own
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn counting(limit: u32) -> (Arc<AtomicU32>, impl FnMut() -> bool + Send + 'static) {
        let count = Arc::new(AtomicU32::new(0));
        let inner = count.clone();
        (count, move || inner.fetch_add(1, Ordering::SeqCst) + 1 < limit)
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period() {
        let (count, on_tick) = counting(u32::MAX);
        let _handle = Countdown::start(Duration::from_secs(1), on_tick);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_callback_returns_false() {
        let (count, on_tick) = counting(5);
        let handle = Countdown::start(Duration::from_secs(1), on_tick);

        tokio::time::sleep(Duration::from_millis(10_500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 5);
        assert!(handle.is_finished());
        assert!(!handle.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticking() {
        let (count, on_tick) = counting(u32::MAX);
        let handle = Countdown::start(Duration::from_secs(1), on_tick);

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        handle.cancel();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(handle.is_cancelled());
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let (count, on_tick) = counting(u32::MAX);
        let handle = Countdown::start(Duration::from_secs(1), on_tick);

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        drop(handle);
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
