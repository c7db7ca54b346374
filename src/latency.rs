//! Simulated I/O latency.
//!
//! Every query runs behind a [`LatencySimulator`], standing in for network or disk
//! variance. The simulator suspends the calling task with `tokio::time::sleep`, so other
//! in-flight queries keep making progress while one is waiting.
//!
//! # Policies
//!
//! ```
//! use dashboard_kit::latency::LatencyPolicy;
//!
//! // Uniform delay in [0, 5000) ms (default)
//! let _policy = LatencyPolicy::default();
//!
//! // Always wait 250 ms
//! let _policy = LatencyPolicy::Fixed { ms: 250 };
//!
//! // No delay at all, for tests
//! let _policy = LatencyPolicy::Disabled;
//! ```
//!
//! | Policy | Delay |
//! |--------|-------|
//! | `Disabled` | none |
//! | `Fixed { ms }` | exactly `ms` |
//! | `Uniform { max_ms }` | uniform in `[0, max_ms)`; `max_ms = 0` means none |

use crate::operation::Operation;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Upper bound (exclusive) of the default uniform delay, in milliseconds.
pub const DEFAULT_MAX_LATENCY_MS: u64 = 5000;

/// How long each query waits before touching the dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LatencyPolicy {
    /// No delay.
    Disabled,

    /// Same delay on every call.
    Fixed { ms: u64 },

    /// Delay drawn uniformly from `[0, max_ms)`.
    Uniform { max_ms: u64 },
}

impl Default for LatencyPolicy {
    fn default() -> Self {
        LatencyPolicy::Uniform {
            max_ms: DEFAULT_MAX_LATENCY_MS,
        }
    }
}

impl LatencyPolicy {
    /// Draw the delay for one call.
    pub fn sample(&self) -> Duration {
        match self {
            LatencyPolicy::Disabled => Duration::ZERO,
            LatencyPolicy::Fixed { ms } => Duration::from_millis(*ms),
            LatencyPolicy::Uniform { max_ms: 0 } => Duration::ZERO,
            LatencyPolicy::Uniform { max_ms } => {
                let micros = rand::rng().random_range(0..max_ms.saturating_mul(1000));
                Duration::from_micros(micros)
            }
        }
    }
}

/// Wraps reads with a randomized, cooperative delay.
#[derive(Clone, Debug, Default)]
pub struct LatencySimulator {
    policy: LatencyPolicy,
}

impl LatencySimulator {
    pub fn new(policy: LatencyPolicy) -> Self {
        LatencySimulator { policy }
    }

    /// A simulator that never waits.
    pub fn disabled() -> Self {
        Self::new(LatencyPolicy::Disabled)
    }

    pub fn policy(&self) -> &LatencyPolicy {
        &self.policy
    }

    /// Suspend the current task for one sampled delay and return it.
    pub async fn delay(&self, operation: Operation) -> Duration {
        let delay = self.policy.sample();
        if delay.is_zero() {
            return delay;
        }

        debug!("{}: simulating {:?} of latency", operation, delay);
        tokio::time::sleep(delay).await;
        debug!("{}: data fetch completed after {:?}", operation, delay);

        delay
    }

    /// Wait for one sampled delay, then drive `read` to completion.
    ///
    /// Returns the delay that was applied alongside the read's output.
    pub async fn simulate<F>(&self, operation: Operation, read: F) -> (Duration, F::Output)
    where
        F: Future,
    {
        let delay = self.delay(operation).await;
        (delay, read.await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_policy_default_is_uniform_5s() {
        assert_eq!(
            LatencyPolicy::default(),
            LatencyPolicy::Uniform { max_ms: 5000 }
        );
    }

    #[test]
    fn test_uniform_sample_in_range() {
        let policy = LatencyPolicy::Uniform { max_ms: 20 };
        for _ in 0..1000 {
            assert!(policy.sample() < Duration::from_millis(20));
        }
    }

    #[test]
    fn test_zero_width_uniform_is_disabled() {
        let policy = LatencyPolicy::Uniform { max_ms: 0 };
        assert_eq!(policy.sample(), Duration::ZERO);
    }

    #[test]
    fn test_policy_serde() {
        let policy: LatencyPolicy = serde_json::from_str(r#"{"mode":"fixed","ms":250}"#).unwrap();
        assert_eq!(policy, LatencyPolicy::Fixed { ms: 250 });

        let policy: LatencyPolicy = serde_json::from_str(r#"{"mode":"disabled"}"#).unwrap();
        assert_eq!(policy, LatencyPolicy::Disabled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_suspends() {
        let simulator = LatencySimulator::new(LatencyPolicy::Fixed { ms: 1500 });
        let start = Instant::now();

        let (delay, value) = simulator
            .simulate(Operation::Revenue, async { 42 })
            .await;

        assert_eq!(value, 42);
        assert_eq!(delay, Duration::from_millis(1500));
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_does_not_wait() {
        let simulator = LatencySimulator::disabled();
        let start = Instant::now();

        let (delay, _) = simulator.simulate(Operation::Customers, async {}).await;

        assert_eq!(delay, Duration::ZERO);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_delays_overlap() {
        let simulator = LatencySimulator::new(LatencyPolicy::Fixed { ms: 1000 });
        let start = Instant::now();

        let (a, b) = tokio::join!(
            simulator.delay(Operation::Revenue),
            simulator.delay(Operation::CardData)
        );

        assert_eq!(a + b, Duration::from_millis(2000));
        // Cooperative suspension: two waits run side by side, not back to back.
        assert!(start.elapsed() < Duration::from_millis(2000));
    }
}
