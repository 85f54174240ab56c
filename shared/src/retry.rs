//! Bounded retries with an explicit exhausted outcome.
//!
//! A `RetrySchedule` is polled with the current time and answers whether an
//! attempt is due, whether to keep waiting, or whether the attempt budget is
//! spent. Nothing sleeps or blocks.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetryError {
    /// Every allowed attempt was made without success
    #[error("Gave up after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Delay between two consecutive attempts
#[derive(Clone, Debug, PartialEq)]
pub enum Backoff {
    Fixed {
        delay_ms: u64,
    },
    Exponential {
        initial_ms: u64,
        max_ms: u64,
        multiplier: f64,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    /// Attempts allowed in total, including the first one
    pub max_attempts: u32,
    pub backoff: Backoff,
    /// Fraction of each delay randomly added or removed, from 0.0 to 1.0
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff: Backoff::Exponential {
                initial_ms: 500,
                max_ms: 4000,
                multiplier: 2.0,
            },
            jitter: 0.1,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after attempt number `attempt` (1-based) failed,
    /// before jitter is applied
    pub fn delay_for(&self, attempt: u32) -> u64 {
        match &self.backoff {
            Backoff::Fixed { delay_ms } => *delay_ms,
            Backoff::Exponential {
                initial_ms,
                max_ms,
                multiplier,
            } => {
                let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
                let delay = *initial_ms as f64 * multiplier.powi(exponent);
                if delay.is_finite() {
                    delay.min(*max_ms as f64) as u64
                } else {
                    *max_ms
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RetryPoll {
    /// Make attempt number `n` now
    Attempt(u32),
    /// The next attempt is not due yet
    Wait,
    /// No attempts left. Returned once; later polls return `Settled`
    Exhausted(RetryError),
    /// Succeeded or already reported as exhausted
    Settled,
}

pub struct RetrySchedule {
    policy: RetryPolicy,
    rng: fastrand::Rng,
    attempts: u32,
    next_attempt_ms: Option<u64>,
    settled: bool,
}

impl RetrySchedule {
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_rng(policy, fastrand::Rng::new())
    }

    /// Deterministic jitter, for tests
    pub fn with_seed(policy: RetryPolicy, seed: u64) -> Self {
        Self::with_rng(policy, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(policy: RetryPolicy, rng: fastrand::Rng) -> Self {
        Self {
            policy,
            rng,
            attempts: 0,
            next_attempt_ms: None,
            settled: false,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn poll(&mut self, now_ms: u64) -> RetryPoll {
        if self.settled {
            return RetryPoll::Settled;
        }

        if let Some(next_attempt_ms) = self.next_attempt_ms {
            if now_ms < next_attempt_ms {
                return RetryPoll::Wait;
            }
        }

        if self.attempts >= self.policy.max_attempts {
            self.settled = true;
            return RetryPoll::Exhausted(RetryError::Exhausted {
                attempts: self.attempts,
            });
        }

        self.attempts += 1;
        let delay_ms = self.jittered(self.policy.delay_for(self.attempts));
        self.next_attempt_ms = Some(now_ms.saturating_add(delay_ms));
        RetryPoll::Attempt(self.attempts)
    }

    /// Stops the schedule; no further attempts are made
    pub fn succeed(&mut self) {
        self.settled = true;
    }

    /// Starts over with a fresh attempt budget
    pub fn reset(&mut self) {
        self.attempts = 0;
        self.next_attempt_ms = None;
        self.settled = false;
    }

    fn jittered(&mut self, delay_ms: u64) -> u64 {
        let jitter = self.policy.jitter.clamp(0.0, 1.0);
        if jitter == 0.0 {
            return delay_ms;
        }
        let spread = (self.rng.f64() * 2.0 - 1.0) * jitter;
        (delay_ms as f64 * (1.0 + spread)).max(0.0) as u64
    }
}
