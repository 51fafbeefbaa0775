//! Backoff arithmetic and the delay seam used between attempts.
//!
//! Transport failures back off exponentially from the configured base delay.
//! Rate-limited responses wait for however long the server asked (see
//! [`crate::rate_limit`]). Both kinds of wait go through a [`Sleeper`], so
//! tests can observe the delays without actually waiting.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Returns the delay after a transport failure on the given attempt.
///
/// `attempt` is 0-indexed, so the first retry waits `base_delay`, the
/// second `base_delay * 2`, and so on. Saturates instead of overflowing.
///
/// # Examples
///
/// ```
/// use rocketreach::retry::exponential_delay;
/// use std::time::Duration;
///
/// let base = Duration::from_millis(100);
/// assert_eq!(exponential_delay(base, 0), Duration::from_millis(100));
/// assert_eq!(exponential_delay(base, 3), Duration::from_millis(800));
/// ```
pub fn exponential_delay(base_delay: Duration, attempt: usize) -> Duration {
    let exponent = u32::try_from(attempt).unwrap_or(u32::MAX);
    let multiplier = 2u32.saturating_pow(exponent);
    base_delay.saturating_mul(multiplier)
}

/// A boxed future returned by [`Sleeper::sleep`].
pub type SleepFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// Waits between retry attempts.
///
/// The executor calls this once per retry with the computed delay.
/// Implement it to control time in tests.
///
/// # Examples
///
/// ```
/// use rocketreach::retry::{SleepFuture, Sleeper};
/// use std::time::Duration;
///
/// /// Never waits.
/// #[derive(Debug)]
/// struct NoSleep;
///
/// impl Sleeper for NoSleep {
///     fn sleep(&self, _duration: Duration) -> SleepFuture<'_> {
///         Box::pin(async {})
///     }
/// }
/// ```
pub trait Sleeper: Send + Sync + std::fmt::Debug {
    /// Waits for `duration`.
    fn sleep(&self, duration: Duration) -> SleepFuture<'_>;
}

/// The default [`Sleeper`], backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// A [`Sleeper`] that returns immediately and records every requested delay.
///
/// Clones share the same record, so keep one clone to inspect after handing
/// another to the executor.
///
/// # Examples
///
/// ```
/// use rocketreach::retry::{RecordingSleeper, Sleeper};
/// use std::time::Duration;
///
/// # async fn example() {
/// let sleeper = RecordingSleeper::new();
/// sleeper.sleep(Duration::from_secs(5)).await;
/// assert_eq!(sleeper.recorded(), vec![Duration::from_secs(5)]);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    /// Creates a sleeper with an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the delays requested so far, oldest first.
    pub fn recorded(&self) -> Vec<Duration> {
        match self.delays.lock() {
            Ok(delays) => delays.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
        match self.delays.lock() {
            Ok(mut delays) => delays.push(duration),
            Err(poisoned) => poisoned.into_inner().push(duration),
        }
        Box::pin(async {})
    }
}
