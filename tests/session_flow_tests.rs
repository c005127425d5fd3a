//! End-to-end session flows.
//!
//! These tests run the session controller against the event router with the
//! real display and tray sinks attached, on tokio's paused clock:
//! - A full session reaching every subscriber
//! - Cancellation in the middle of a phase
//! - Cancellation before the first phase
//! - Notification failures not affecting the timer

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::unbounded;
use tokio::sync::mpsc;

use tomatick::app::{EventRouter, EventSink};
use tomatick::menubar::{TrayIconKind, TrayPublisher, TrayReflector, IDLE_TITLE};
use tomatick::notification::{MockNotifier, Notifier};
use tomatick::timer::{CancellationSignal, SessionController, SessionOutcome, TimerEvent};
use tomatick::types::{Phase, SessionConfig};
use tomatick::ui::{CountdownView, SessionEnd, SharedCountdown};

// ============================================================================
// Test Helpers
// ============================================================================

/// Sink that records every event it sees.
#[derive(Clone, Default)]
struct Recorder {
    events: Arc<Mutex<Vec<TimerEvent>>>,
}

impl Recorder {
    fn events(&self) -> Vec<TimerEvent> {
        self.events.lock().unwrap().clone()
    }

    fn ticks(&self, phase: Phase, round: u32) -> Vec<i64> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TimerEvent::Tick(tick) if tick.phase == phase && tick.round == round => {
                    Some(tick.remaining_seconds)
                }
                _ => None,
            })
            .collect()
    }
}

impl EventSink for Recorder {
    fn name(&self) -> &'static str {
        "recorder"
    }

    fn handle(&mut self, event: &TimerEvent) -> anyhow::Result<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// Everything wired together the way the application does it.
struct Harness {
    controller: SessionController,
    router: EventRouter,
    notifier: Arc<MockNotifier>,
    cancel: CancellationSignal,
    view: SharedCountdown,
    reflector: TrayReflector,
    recorder: Recorder,
}

fn create_harness(config: SessionConfig) -> Harness {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (tray_tx, tray_rx) = unbounded();
    let notifier = Arc::new(MockNotifier::new());
    let cancel = CancellationSignal::new();
    let view = SharedCountdown::new(CountdownView::new(config.tag.clone(), config.rounds));
    let recorder = Recorder::default();

    let router = EventRouter::new(event_rx)
        .with_sink(view.sink())
        .with_sink(TrayPublisher::new(tray_tx))
        .with_sink(recorder.clone());
    let controller = SessionController::new(
        &config,
        Arc::clone(&notifier) as Arc<dyn Notifier>,
        event_tx,
        cancel.clone(),
    );

    Harness {
        controller,
        router,
        notifier,
        cancel,
        view,
        reflector: TrayReflector::new(config.tag.clone(), tray_rx),
        recorder,
    }
}

/// Runs the session and router to completion. Returns the outcome and the
/// number of routed events.
async fn run_to_end(
    controller: SessionController,
    router: EventRouter,
) -> (SessionOutcome, u64) {
    let router_task = tokio::spawn(router.run());
    let mut controller = controller;
    let outcome = controller.run().await.unwrap();
    // Dropping the controller closes the event channel.
    drop(controller);
    let routed = router_task.await.unwrap();
    (outcome, routed)
}

fn config(work_secs: u64, break_secs: u64, rounds: u32) -> SessionConfig {
    SessionConfig::default()
        .with_work_duration(Duration::from_secs(work_secs))
        .with_break_duration(Duration::from_secs(break_secs))
        .with_rounds(rounds)
        .with_tag("Coding")
}

// ============================================================================
// Full Session
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_single_round_reaches_every_subscriber() {
    let Harness {
        controller,
        router,
        notifier,
        view,
        mut reflector,
        recorder,
        ..
    } = create_harness(config(2, 1, 1));

    let (outcome, routed) = run_to_end(controller, router).await;

    assert_eq!(
        outcome,
        SessionOutcome::Completed {
            completed_rounds: 1,
            total_rounds: 1
        }
    );
    // 2 starts + 3 ticks + 2 completions + session end
    assert_eq!(routed, 8);
    assert_eq!(recorder.ticks(Phase::Work, 1), vec![2, 1]);
    assert_eq!(recorder.ticks(Phase::Break, 1), vec![1]);

    let snapshot = view.snapshot().unwrap();
    assert_eq!(snapshot.ended(), Some(SessionEnd::Completed));
    assert_eq!(snapshot.completed_rounds(), 1);

    reflector.process_pending_updates();
    assert_eq!(reflector.title(), IDLE_TITLE);
    assert_eq!(reflector.current_icon(), Some(TrayIconKind::Idle));

    let messages = notifier.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("Start work, tag: 'Coding', round:1/1, end time: "));
    assert!(messages[1].starts_with("Start rest, tag: 'Coding', round:1/1, end time: "));
}

#[tokio::test(start_paused = true)]
async fn test_multi_round_phase_order() {
    let Harness {
        controller,
        router,
        notifier,
        recorder,
        ..
    } = create_harness(config(1, 1, 3));

    let start = tokio::time::Instant::now();
    let (outcome, _) = run_to_end(controller, router).await;

    assert_eq!(outcome.completed_rounds(), 3);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(6));
    assert!(elapsed < Duration::from_millis(6050));

    let started: Vec<(Phase, u32)> = recorder
        .events()
        .into_iter()
        .filter_map(|event| match event {
            TimerEvent::PhaseStarted { phase, round, .. } => Some((phase, round)),
            _ => None,
        })
        .collect();
    assert_eq!(
        started,
        vec![
            (Phase::Work, 1),
            (Phase::Break, 1),
            (Phase::Work, 2),
            (Phase::Break, 2),
            (Phase::Work, 3),
            (Phase::Break, 3),
        ]
    );
    assert_eq!(notifier.call_count(), 6);
    assert!(notifier.messages()[4].contains("round:3/3"));
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_cancel_mid_phase_keeps_completed_rounds() {
    let Harness {
        controller,
        router,
        cancel,
        view,
        mut reflector,
        recorder,
        ..
    } = create_harness(config(3, 2, 3));

    // Round 1 ends at 5s; cancel inside round 2's work phase.
    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(6500)).await;
        canceller.cancel();
    });

    let (outcome, _) = run_to_end(controller, router).await;

    assert_eq!(
        outcome,
        SessionOutcome::Cancelled {
            completed_rounds: 1,
            total_rounds: 3
        }
    );
    assert_eq!(recorder.ticks(Phase::Work, 2), vec![3, 2]);
    assert_eq!(
        recorder.events().last(),
        Some(&TimerEvent::SessionCancelled {
            completed_rounds: 1,
            phase: Some(Phase::Work),
        })
    );
    assert!(!recorder.events().iter().any(|event| matches!(
        event,
        TimerEvent::PhaseCompleted {
            round: 2,
            ..
        }
    )));

    let snapshot = view.snapshot().unwrap();
    assert_eq!(snapshot.ended(), Some(SessionEnd::Cancelled));
    assert_eq!(snapshot.completed_rounds(), 1);

    reflector.process_pending_updates();
    assert_eq!(reflector.current_icon(), Some(TrayIconKind::Idle));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_before_start_sends_nothing_else() {
    let Harness {
        controller,
        router,
        notifier,
        cancel,
        recorder,
        ..
    } = create_harness(config(25 * 60, 5 * 60, 5));

    cancel.cancel();
    let (outcome, routed) = run_to_end(controller, router).await;

    assert_eq!(outcome.completed_rounds(), 0);
    assert_eq!(routed, 1);
    assert_eq!(
        recorder.events(),
        vec![TimerEvent::SessionCancelled {
            completed_rounds: 0,
            phase: None,
        }]
    );
    assert_eq!(notifier.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_cancel_is_harmless() {
    let Harness {
        controller,
        router,
        cancel,
        ..
    } = create_harness(config(10, 5, 2));

    let canceller = cancel.clone();
    let cancels = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(2)).await;
        [canceller.cancel(), canceller.cancel(), canceller.cancel()]
    });

    let (outcome, _) = run_to_end(controller, router).await;
    assert!(matches!(outcome, SessionOutcome::Cancelled { .. }));
    assert_eq!(cancels.await.unwrap(), [true, false, false]);
}

// ============================================================================
// Degraded Collaborators
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_failing_notifier_does_not_stop_session() {
    let Harness {
        controller,
        router,
        notifier,
        recorder,
        ..
    } = create_harness(config(2, 1, 2));
    notifier.set_should_fail(true);

    let (outcome, _) = run_to_end(controller, router).await;

    assert_eq!(outcome.completed_rounds(), 2);
    assert_eq!(notifier.call_count(), 4);
    assert_eq!(recorder.ticks(Phase::Work, 2), vec![2, 1]);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_tray_reflector_does_not_stop_session() {
    let Harness {
        controller,
        router,
        reflector,
        view,
        ..
    } = create_harness(config(1, 1, 1));
    drop(reflector);

    let (outcome, routed) = run_to_end(controller, router).await;

    assert_eq!(outcome.completed_rounds(), 1);
    assert_eq!(routed, 7);
    assert_eq!(
        view.snapshot().unwrap().ended(),
        Some(SessionEnd::Completed)
    );
}
