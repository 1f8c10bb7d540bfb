//! Bounded retry for completion calls.
//!
//! Every failure is retried: transport errors, non-2xx statuses, undecodable
//! bodies and empty replies alike. The delay between attempts comes from a
//! [`DelayStrategy`], so fixed pacing and exponential backoff are
//! interchangeable without touching callers.

use crate::llm::CompletionError;
use mindful_core::{Backoff, SessionConfig};
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DelayStrategy {
    /// Same pause before every retry.
    Fixed(Duration),
    /// `initial * factor^(n-1)` before the n-th retry, capped at `max`.
    Exponential {
        initial: Duration,
        max: Duration,
        factor: f64,
    },
}

/// Configuration for retry behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    pub delay: DelayStrategy,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: DelayStrategy::Fixed(Duration::from_secs(1)),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &SessionConfig) -> Self {
        let delay = match config.backoff {
            Backoff::Fixed => DelayStrategy::Fixed(config.retry_delay()),
            Backoff::Exponential => DelayStrategy::Exponential {
                initial: config.retry_delay(),
                max: config.max_retry_delay(),
                factor: 2.0,
            },
        };
        Self {
            max_attempts: config.max_retries.max(1),
            delay,
        }
    }

    /// Retry immediately, mostly useful in tests.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            delay: DelayStrategy::Fixed(Duration::ZERO),
        }
    }

    /// Pause before the retry that follows failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match self.delay {
            DelayStrategy::Fixed(d) => d,
            DelayStrategy::Exponential {
                initial,
                max,
                factor,
            } => {
                let exp = attempt.saturating_sub(1).min(63) as i32;
                let secs = initial.as_secs_f64() * factor.powi(exp);
                Duration::try_from_secs_f64(secs.min(max.as_secs_f64())).unwrap_or(max)
            }
        }
    }
}

/// Run `operation` until it succeeds or the policy's attempts are used up.
///
/// The closure receives the 1-based attempt number. On exhaustion the last
/// error is wrapped in [`CompletionError::Exhausted`].
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    provider_name: &str,
    mut operation: F,
) -> Result<T, CompletionError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, CompletionError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match operation(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!("{} succeeded on attempt {}", provider_name, attempt);
                }
                return Ok(value);
            }
            Err(e) => {
                tracing::warn!(
                    "{} failed on attempt {}/{}: {}",
                    provider_name,
                    attempt,
                    max_attempts,
                    e
                );
                last_error = Some(e);
            }
        }

        if attempt < max_attempts {
            let sleep_time = policy.delay_after(attempt);
            tracing::info!(
                "{} retrying in {:.1}s (attempt {}/{})",
                provider_name,
                sleep_time.as_secs_f64(),
                attempt + 1,
                max_attempts
            );
            tokio::time::sleep(sleep_time).await;
        }
    }

    Err(CompletionError::Exhausted {
        attempts: max_attempts,
        last: Box::new(last_error.unwrap_or(CompletionError::EmptyReply)),
    })
}
