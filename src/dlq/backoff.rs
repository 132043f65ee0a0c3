//! Per-message retry delay, exponential with jitter.
//!
//! Grounded on [`crate::supervisor::backoff::RestartBackoff`]'s exponential formula, adapted
//! to a stateless per-message counter (a dead letter carries its own `attempts` field rather
//! than a sliding window), a configurable multiplier rather than a hardcoded doubling, and
//! two-sided jitter so a burst of failures doesn't retry in lockstep.

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use rand::Rng;

/// Exponential-backoff-with-jitter delay calculator for dead-letter retries.
#[derive(Debug, Clone, Copy)]
pub struct RetryBackoff {
    /// How many delivery attempts the retry handler makes before dead-lettering for good.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on the computed delay, before jitter is applied.
    pub max_delay: Duration,
    /// Growth factor applied per additional attempt.
    pub multiplier: f64,
    /// Fractional jitter applied as `delay * (1 ± jitter)`.
    pub jitter: f64,
}

impl Default for RetryBackoff {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(300),
            multiplier: 2.0,
            jitter: 0.1,
        }
    }
}

impl RetryBackoff {
    /// Compute the delay before the `attempt`-th retry (1-indexed).
    ///
    /// `delay(attempt) = min(max_delay, initial_delay * multiplier^(attempt-1)) * (1 ± jitter)`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(32);
        let growth = self.multiplier.powi(exponent as i32);
        let base = self.initial_delay.mul_f64(growth).min(self.max_delay);

        if self.jitter <= 0.0 {
            return base;
        }
        let jitter_fraction: f64 = rand::thread_rng().gen_range(-self.jitter..=self.jitter);
        base.mul_f64((1.0 + jitter_fraction).max(0.0))
    }
}
