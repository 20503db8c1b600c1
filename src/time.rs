//! Sleep abstraction for testability.
//!
//! This module provides a [`Sleeper`] trait that allows injecting instant or
//! recording sleepers in tests while using the Tokio timer in production.

use std::time::Duration;

/// Abstraction over "suspend the caller for a duration".
///
/// Retry backoff goes through this trait so tests can observe the requested
/// delays without actually waiting for them.
///
/// # Example
///
/// ```
/// use slack_post::time::{InstantSleeper, Sleeper};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// InstantSleeper.sleep(Duration::from_secs(3600)).await; // returns immediately
/// # }
/// ```
pub trait Sleeper: Send + Sync {
    /// Suspends the current task for `duration`.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

/// Production sleeper backed by [`tokio::time::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately.
///
/// Useful in tests and dry runs where backoff delays only slow things down.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

impl<S: Sleeper> Sleeper for &S {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await;
    }
}
