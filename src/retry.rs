//! Exponential-backoff retry execution.
//!
//! [`RetryExecutor`] runs an async operation up to `max_attempts` times,
//! sleeping `initial_backoff * 2^attempt` between failures. The final failure
//! is handed back to the caller unchanged.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::time::{Sleeper, TokioSleeper};

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;

/// Returned when no attempt could be made at all.
///
/// This only happens when `max_attempts` is zero. Operation error types opt
/// into retries by implementing `From<RetryExhausted>`, which lets the
/// executor return the operation's own error type without wrapping it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Max retries exceeded")]
pub struct RetryExhausted;

/// Per-call retry configuration.
///
/// # Defaults
///
/// - `max_attempts`: 3
/// - `initial_backoff`: 1 second
///
/// # Example
///
/// ```
/// use slack_post::retry::RetryConfig;
/// use std::time::Duration;
///
/// let config = RetryConfig::new()
///     .with_max_attempts(5)
///     .with_initial_backoff(Duration::from_millis(200));
///
/// assert_eq!(config.backoff_for_attempt(0), Duration::from_millis(200));
/// assert_eq!(config.backoff_for_attempt(3), Duration::from_millis(1600));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one.
    ///
    /// Zero is allowed and makes every execution fail with [`RetryExhausted`]
    /// without invoking the operation.
    pub max_attempts: u32,

    /// Delay after the first failed attempt.
    ///
    /// Doubles for each subsequent failure. There is no ceiling.
    pub initial_backoff: Duration,
}

impl RetryConfig {
    /// Default maximum attempts.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Default initial backoff (1 second).
    pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(1000);

    /// Creates a config with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            initial_backoff: Self::DEFAULT_INITIAL_BACKOFF,
        }
    }

    /// Sets the maximum number of attempts.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the initial backoff.
    ///
    /// Zero is accepted and produces a tight retry loop.
    #[must_use]
    pub const fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    /// Returns the delay to sleep after attempt `attempt` (0-indexed) fails.
    ///
    /// Computed as `initial_backoff * 2^attempt`, saturating at
    /// [`Duration::MAX`] instead of overflowing.
    #[must_use]
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        1u32.checked_shl(attempt)
            .and_then(|factor| self.initial_backoff.checked_mul(factor))
            .unwrap_or(Duration::MAX)
    }

    /// Returns true if `attempt` (0-indexed) is the last one allowed.
    #[must_use]
    pub const fn is_final_attempt(&self, attempt: u32) -> bool {
        attempt.saturating_add(1) >= self.max_attempts
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs operations with exponential-backoff retry.
///
/// The executor is stateless apart from its configuration: concurrent or
/// nested executions do not affect each other.
///
/// # Type Parameters
///
/// - `S`: The sleeper used between attempts (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```
/// use slack_post::retry::{RetryConfig, RetryExecutor, RetryExhausted};
/// use slack_post::time::InstantSleeper;
///
/// #[derive(Debug)]
/// struct Flaky;
///
/// impl std::fmt::Display for Flaky {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str("flaky")
///     }
/// }
///
/// impl From<RetryExhausted> for Flaky {
///     fn from(_: RetryExhausted) -> Self {
///         Self
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let executor = RetryExecutor::new(RetryConfig::default()).with_sleeper(InstantSleeper);
/// let mut calls = 0;
/// let result: Result<&str, Flaky> = executor
///     .execute(|| {
///         calls += 1;
///         let outcome = if calls < 3 { Err(Flaky) } else { Ok("ok") };
///         async move { outcome }
///     })
///     .await;
///
/// assert_eq!(result.unwrap(), "ok");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RetryExecutor<S = TokioSleeper> {
    config: RetryConfig,
    sleeper: S,
}

impl RetryExecutor<TokioSleeper> {
    /// Creates an executor that sleeps with the Tokio timer.
    #[must_use]
    pub const fn new(config: RetryConfig) -> Self {
        Self {
            config,
            sleeper: TokioSleeper,
        }
    }
}

impl Default for RetryExecutor<TokioSleeper> {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}

impl<S> RetryExecutor<S> {
    /// Replaces the sleeper used between attempts.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> RetryExecutor<S2> {
        RetryExecutor {
            config: self.config,
            sleeper,
        }
    }

    /// Replaces the retry configuration, keeping the sleeper.
    #[must_use]
    pub fn with_config(mut self, config: RetryConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the retry configuration.
    #[must_use]
    pub const fn config(&self) -> &RetryConfig {
        &self.config
    }
}

impl<S: Sleeper> RetryExecutor<S> {
    /// Executes `operation`, retrying failures with exponential backoff.
    ///
    /// Returns the first successful result. If every attempt fails, the error
    /// from the last attempt is returned as-is. No sleep happens after the
    /// last attempt.
    ///
    /// # Errors
    ///
    /// - `E::from(RetryExhausted)` if `max_attempts` is zero (the operation
    ///   is never invoked)
    /// - The operation's own error from the final attempt
    pub async fn execute<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<RetryExhausted> + Display,
    {
        let max_attempts = self.config.max_attempts;

        if max_attempts == 0 {
            tracing::debug!("max_attempts is 0, skipping operation");
            return Err(RetryExhausted.into());
        }

        for attempt in 0..max_attempts {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if self.config.is_final_attempt(attempt) => {
                    tracing::debug!(
                        attempt = attempt + 1,
                        max_attempts,
                        "Final attempt failed: {e}"
                    );
                    return Err(e);
                }
                Err(e) => {
                    let delay = self.config.backoff_for_attempt(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_attempts,
                        delay_ms = delay.as_millis(),
                        "Attempt failed, retrying: {e}"
                    );
                    self.sleeper.sleep(delay).await;
                }
            }
        }

        // Every iteration either returns or sleeps and continues; the last
        // iteration always returns.
        Err(RetryExhausted.into())
    }
}

/// Executes `operation` with the given attempt budget and initial backoff,
/// sleeping with the Tokio timer.
///
/// Shorthand for `RetryExecutor::new(config).execute(operation)`.
///
/// # Errors
///
/// See [`RetryExecutor::execute`].
pub async fn execute_with_retry<T, E, F, Fut>(
    operation: F,
    max_attempts: u32,
    initial_backoff: Duration,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: From<RetryExhausted> + Display,
{
    let config = RetryConfig::new()
        .with_max_attempts(max_attempts)
        .with_initial_backoff(initial_backoff);

    RetryExecutor::new(config).execute(operation).await
}
