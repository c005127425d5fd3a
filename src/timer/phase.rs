//! Drives a single work or break interval to completion.
//!
//! The timer computes an absolute end time, waits for it, and samples the
//! remaining time once per tick interval in between. The first sample is
//! taken at phase start, so a phase of D seconds yields D ticks. When the
//! end time and a tick land on the same instant, completion wins.

use tokio::time::{interval_at, sleep_until, Duration, Instant, MissedTickBehavior};

use super::cancel::CancellationSignal;
use crate::types::signed_seconds;

/// Default cadence of remaining-time samples.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// End time used when `start + duration` is not representable.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// How a phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseOutcome {
    /// The full duration elapsed
    Completed {
        /// Ticks delivered during the phase
        ticks: u32,
    },
    /// The cancellation signal fired first
    Cancelled {
        /// Ticks delivered before cancellation
        ticks: u32,
    },
}

impl PhaseOutcome {
    /// Returns the number of ticks delivered.
    pub fn ticks(&self) -> u32 {
        match self {
            PhaseOutcome::Completed { ticks } | PhaseOutcome::Cancelled { ticks } => *ticks,
        }
    }

    /// Returns true if the phase was cut short.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PhaseOutcome::Cancelled { .. })
    }
}

/// Countdown for one phase.
#[derive(Debug, Clone, Copy)]
pub struct PhaseTimer {
    tick_interval: Duration,
}

impl Default for PhaseTimer {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl PhaseTimer {
    /// Creates a phase timer sampling every `tick_interval`.
    pub fn new(tick_interval: Duration) -> Self {
        Self { tick_interval }
    }

    /// Runs one phase of `duration`, calling `on_tick` with the remaining
    /// whole seconds on every tick.
    ///
    /// A zero duration completes immediately without ticking. A duration too
    /// large for the clock is clamped to roughly thirty years.
    pub async fn run<F>(
        &self,
        duration: Duration,
        cancel: &CancellationSignal,
        mut on_tick: F,
    ) -> PhaseOutcome
    where
        F: FnMut(i64),
    {
        if duration.is_zero() {
            return PhaseOutcome::Completed { ticks: 0 };
        }

        let start = Instant::now();
        let end = start.checked_add(duration).unwrap_or_else(|| {
            tracing::warn!(?duration, "phase duration overflows the clock, clamping");
            start + FAR_FUTURE
        });

        let done = sleep_until(end);
        tokio::pin!(done);

        let mut ticker = interval_at(start, self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut ticks = 0;
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return PhaseOutcome::Cancelled { ticks };
                }
                _ = &mut done => {
                    return PhaseOutcome::Completed { ticks };
                }
                at = ticker.tick() => {
                    ticks += 1;
                    on_tick(remaining_seconds(end, at));
                }
            }
        }
    }
}

/// Signed whole seconds from `now` until `end`.
fn remaining_seconds(end: Instant, now: Instant) -> i64 {
    if end >= now {
        signed_seconds(end - now)
    } else {
        -signed_seconds(now - end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod remaining_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_remaining_rounds_to_nearest_second() {
            let now = Instant::now();
            assert_eq!(remaining_seconds(now + Duration::from_millis(1499), now), 1);
            assert_eq!(remaining_seconds(now + Duration::from_millis(1500), now), 2);
            assert_eq!(remaining_seconds(now, now), 0);
        }

        #[tokio::test(start_paused = true)]
        async fn test_remaining_negative_after_end() {
            let end = Instant::now();
            let later = end + Duration::from_secs(1);
            assert_eq!(remaining_seconds(end, later), -1);
        }
    }

    mod phase_timer_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_zero_duration_completes_without_ticks() {
            let timer = PhaseTimer::default();
            let cancel = CancellationSignal::new();
            let mut samples = Vec::new();

            let outcome = timer
                .run(Duration::ZERO, &cancel, |r| samples.push(r))
                .await;

            assert_eq!(outcome, PhaseOutcome::Completed { ticks: 0 });
            assert!(samples.is_empty());
        }

        #[tokio::test(start_paused = true)]
        async fn test_two_second_phase_ticks_twice() {
            let timer = PhaseTimer::default();
            let cancel = CancellationSignal::new();
            let mut samples = Vec::new();

            let outcome = timer
                .run(Duration::from_secs(2), &cancel, |r| samples.push(r))
                .await;

            assert_eq!(outcome, PhaseOutcome::Completed { ticks: 2 });
            assert_eq!(samples, vec![2, 1]);
        }

        #[tokio::test(start_paused = true)]
        async fn test_tick_count_matches_duration() {
            let timer = PhaseTimer::default();
            let cancel = CancellationSignal::new();

            for secs in [1u64, 3, 10, 61] {
                let mut samples = Vec::new();
                let outcome = timer
                    .run(Duration::from_secs(secs), &cancel, |r| samples.push(r))
                    .await;

                assert_eq!(outcome.ticks() as u64, secs);
                assert_eq!(samples.first().copied(), Some(secs as i64));
                assert_eq!(samples.last().copied(), Some(1));
                assert!(
                    samples.windows(2).all(|w| w[0] >= w[1]),
                    "remaining time must not increase: {:?}",
                    samples
                );
            }
        }

        #[tokio::test(start_paused = true)]
        async fn test_completes_after_full_duration() {
            let timer = PhaseTimer::default();
            let cancel = CancellationSignal::new();
            let start = Instant::now();

            timer.run(Duration::from_secs(5), &cancel, |_| {}).await;

            let elapsed = Instant::now() - start;
            assert!(elapsed >= Duration::from_secs(5));
            assert!(elapsed < Duration::from_millis(5010));
        }

        #[tokio::test(start_paused = true)]
        async fn test_sub_second_phase_ticks_once() {
            let timer = PhaseTimer::default();
            let cancel = CancellationSignal::new();
            let mut samples = Vec::new();

            let outcome = timer
                .run(Duration::from_millis(400), &cancel, |r| samples.push(r))
                .await;

            assert_eq!(outcome, PhaseOutcome::Completed { ticks: 1 });
            assert_eq!(samples, vec![0]);
        }

        #[tokio::test(start_paused = true)]
        async fn test_already_cancelled_returns_before_ticking() {
            let timer = PhaseTimer::default();
            let cancel = CancellationSignal::new();
            cancel.cancel();

            let outcome = timer.run(Duration::from_secs(10), &cancel, |_| {}).await;

            assert_eq!(outcome, PhaseOutcome::Cancelled { ticks: 0 });
        }

        #[tokio::test(start_paused = true)]
        async fn test_cancel_mid_phase_stops_promptly() {
            let timer = PhaseTimer::default();
            let cancel = CancellationSignal::new();
            let trigger = cancel.clone();
            let start = Instant::now();

            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(2500)).await;
                trigger.cancel();
            });

            let outcome = timer.run(Duration::from_secs(60), &cancel, |_| {}).await;

            assert!(outcome.is_cancelled());
            assert_eq!(outcome.ticks(), 3);
            assert!(Instant::now() - start < Duration::from_secs(3));
        }

        #[tokio::test(start_paused = true)]
        async fn test_custom_tick_interval() {
            let timer = PhaseTimer::new(Duration::from_millis(500));
            let cancel = CancellationSignal::new();
            let mut samples = Vec::new();

            timer
                .run(Duration::from_secs(2), &cancel, |r| samples.push(r))
                .await;

            assert_eq!(samples.len(), 4);
        }

        #[tokio::test(start_paused = true)]
        async fn test_unrepresentable_duration_does_not_panic() {
            let timer = PhaseTimer::default();
            let cancel = CancellationSignal::new();
            let trigger = cancel.clone();
            let mut samples = Vec::new();

            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(1500)).await;
                trigger.cancel();
            });

            let outcome = timer
                .run(Duration::MAX, &cancel, |r| samples.push(r))
                .await;

            assert_eq!(outcome, PhaseOutcome::Cancelled { ticks: 2 });
            assert!(samples.iter().all(|r| *r > 0));
        }
    }
}
