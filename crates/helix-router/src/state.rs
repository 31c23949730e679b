//! The request state machine and the bounded retry policy, kept separate
//! from the dispatch plumbing so the failed-vs-unavailable classification
//! is testable without a scorer in the loop.

use std::fmt;
use std::time::Duration;

use helix_core::config::RouterConfig;

/// States a prediction request moves through. Transitions are strictly
/// forward; the three terminal states mirror `ResultStatus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    Requested,
    /// Consent verified; carries the consent version read at check time.
    ConsentChecked { consent_version: String },
    Dispatched,
    Completed,
    Failed,
    Unavailable,
}

impl RequestState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestState::Completed | RequestState::Failed | RequestState::Unavailable
        )
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestState::Requested => "requested",
            RequestState::ConsentChecked { .. } => "consent_checked",
            RequestState::Dispatched => "dispatched",
            RequestState::Completed => "completed",
            RequestState::Failed => "failed",
            RequestState::Unavailable => "unavailable",
        };
        f.write_str(name)
    }
}

/// Bounded retry for transient scorer unavailability: a fixed attempt
/// count with exponential backoff, capped by total elapsed time. Explicit
/// state (attempt counter + elapsed) instead of an implicit loop.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_backoff: Duration,
    pub max_elapsed: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &RouterConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_backoff: Duration::from_millis(config.base_backoff_ms),
            max_elapsed: Duration::from_millis(config.max_elapsed_ms),
        }
    }

    /// Whether another attempt is allowed after `attempts_made` attempts
    /// and `elapsed` total time.
    pub fn allows_retry(&self, attempts_made: u32, elapsed: Duration) -> bool {
        attempts_made < self.max_attempts && elapsed < self.max_elapsed
    }

    /// Backoff before attempt `next_attempt` (1-based): base × 2^(n-1),
    /// clamped so a single sleep can never exceed the elapsed budget.
    pub fn backoff_before(&self, next_attempt: u32) -> Duration {
        let factor = 1u32 << next_attempt.saturating_sub(1).min(16);
        (self.base_backoff * factor).min(self.max_elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_backoff: Duration::from_millis(100),
            max_elapsed: Duration::from_secs(10),
        }
    }

    #[test]
    fn backoff_doubles() {
        let p = policy();
        assert_eq!(p.backoff_before(1), Duration::from_millis(100));
        assert_eq!(p.backoff_before(2), Duration::from_millis(200));
        assert_eq!(p.backoff_before(3), Duration::from_millis(400));
    }

    #[test]
    fn attempt_budget_is_bounded() {
        let p = policy();
        assert!(p.allows_retry(1, Duration::ZERO));
        assert!(p.allows_retry(2, Duration::ZERO));
        assert!(!p.allows_retry(3, Duration::ZERO));
    }

    #[test]
    fn elapsed_budget_is_bounded() {
        let p = policy();
        assert!(!p.allows_retry(1, Duration::from_secs(11)));
    }

    #[test]
    fn terminal_states() {
        assert!(!RequestState::Requested.is_terminal());
        assert!(!RequestState::Dispatched.is_terminal());
        assert!(RequestState::Unavailable.is_terminal());
    }
}
