//! Retry orchestration with backoff.
//!
//! One logical request is driven through an explicit, bounded state machine:
//! `Attempting -> {Succeeded | Retrying -> Attempting | Failed}`. Only
//! transport-level failures (connection, timeout) are retried; any received
//! HTTP response succeeds immediately, whatever its status. The wait between
//! attempts is a timer-based suspension, never a blocking sleep, so
//! concurrent requests keep making progress.

use std::iter::Take;
use std::time::Duration;

use tokio_retry::strategy::ExponentialBackoff;

use crate::config::{RETRY_BACKOFF_BASE_MS, RETRY_BACKOFF_SCALE_MS, RETRY_MAX_DELAY_SECS};
use crate::error_handling::{classify_outcome, RequestError, TransientFailure};
use crate::request::RequestDescriptor;
use crate::transport::{TransportAdapter, TransportResponse};

/// Builds the backoff schedule for a retry budget.
///
/// A doubling schedule starting at 300ms and capped at
/// [`RETRY_MAX_DELAY_SECS`]: 300ms, 600ms, 1.2s, 2.4s, ... Four retries
/// accumulate 4.5s of delay, and each wait strictly exceeds the previous
/// until the cap.
fn backoff_schedule(budget: u32) -> Take<ExponentialBackoff> {
    ExponentialBackoff::from_millis(RETRY_BACKOFF_BASE_MS)
        .factor(RETRY_BACKOFF_SCALE_MS)
        .max_delay(Duration::from_secs(RETRY_MAX_DELAY_SECS))
        .take(budget as usize)
}

/// Per-request retry bookkeeping.
///
/// Created at the start of one logical request and discarded when it
/// settles; never shared across requests.
struct RetryState {
    attempts_made: u32,
    remaining: u32,
    schedule: Take<ExponentialBackoff>,
}

impl RetryState {
    fn new(budget: u32) -> Self {
        Self {
            attempts_made: 0,
            remaining: budget,
            schedule: backoff_schedule(budget),
        }
    }

    fn record_attempt(&mut self) {
        self.attempts_made += 1;
    }

    fn attempts_made(&self) -> u32 {
        self.attempts_made
    }

    /// The wait before the next attempt, or `None` when the budget is
    /// exhausted.
    fn next_backoff(&mut self) -> Option<Duration> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.schedule.next()
    }
}

enum Phase {
    Attempting,
    Retrying { delay: Duration },
    Succeeded(TransportResponse),
    Failed(TransientFailure),
}

/// Drives transport attempts until a response arrives or the retry budget
/// runs out.
///
/// Exhaustion yields a [`RequestError::GatewayTimeout`] (status 504)
/// carrying the final failure's message and cause.
pub(crate) async fn execute<T>(
    transport: &T,
    request: &RequestDescriptor,
) -> Result<TransportResponse, RequestError>
where
    T: TransportAdapter + ?Sized,
{
    let mut state = RetryState::new(request.retries);
    let mut phase = Phase::Attempting;

    loop {
        phase = match phase {
            Phase::Attempting => {
                state.record_attempt();
                let outcome = transport.send(request).await;
                match classify_outcome(outcome) {
                    Ok(response) => Phase::Succeeded(response),
                    Err(failure) => match state.next_backoff() {
                        Some(delay) => {
                            log::warn!(
                                "attempt {} for {} failed ({}), retrying in {:?}",
                                state.attempts_made(),
                                request.uri,
                                failure.message,
                                delay
                            );
                            Phase::Retrying { delay }
                        }
                        None => Phase::Failed(failure),
                    },
                }
            }
            Phase::Retrying { delay } => {
                tokio::time::sleep(delay).await;
                Phase::Attempting
            }
            Phase::Succeeded(response) => return Ok(response),
            Phase::Failed(failure) => {
                log::warn!(
                    "request to {} failed after {} attempt(s): {}",
                    request.uri,
                    state.attempts_made(),
                    failure.message
                );
                return Err(RequestError::GatewayTimeout {
                    message: failure.message,
                    attempts: state.attempts_made(),
                    cause: Some(failure.cause),
                });
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_is_strictly_increasing_until_the_cap() {
        let delays: Vec<Duration> = backoff_schedule(8).collect();
        assert_eq!(delays.len(), 8);
        let cap = Duration::from_secs(RETRY_MAX_DELAY_SECS);
        for pair in delays.windows(2) {
            if pair[1] < cap {
                assert!(pair[1] > pair[0], "expected strict growth: {pair:?}");
            } else {
                assert!(pair[1] >= pair[0]);
            }
            assert!(pair[1] <= cap);
        }
    }

    #[test]
    fn schedule_starts_at_300ms_and_doubles() {
        let delays: Vec<Duration> = backoff_schedule(4).collect();
        assert_eq!(delays[0], Duration::from_millis(300));
        assert_eq!(delays[1], Duration::from_millis(600));
        assert_eq!(delays[2], Duration::from_millis(1200));
        assert_eq!(delays[3], Duration::from_millis(2400));
    }

    #[test]
    fn four_retries_accumulate_more_than_1500ms_of_delay() {
        let total: Duration = backoff_schedule(4).sum();
        assert!(
            total > Duration::from_millis(1500),
            "cumulative backoff too small: {total:?}"
        );
    }

    #[test]
    fn zero_budget_yields_no_backoff() {
        let mut state = RetryState::new(0);
        state.record_attempt();
        assert_eq!(state.next_backoff(), None);
        assert_eq!(state.attempts_made(), 1);
    }

    #[test]
    fn budget_limits_the_number_of_backoffs() {
        let mut state = RetryState::new(2);
        assert!(state.next_backoff().is_some());
        assert!(state.next_backoff().is_some());
        assert_eq!(state.next_backoff(), None);
        assert_eq!(state.next_backoff(), None);
    }
}
