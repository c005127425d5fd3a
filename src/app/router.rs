//! Fan-out of timer events to every subscriber.
//!
//! The session controller owns the sending half of an unbounded channel.
//! `EventRouter` drains the receiving half and hands each event to every
//! registered sink in order. It stops once the controller drops its sender.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::timer::TimerEvent;

/// A subscriber to the timer event stream.
pub trait EventSink: Send {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Reacts to one event.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink could not apply the event. The router
    /// logs it and continues with the next sink.
    fn handle(&mut self, event: &TimerEvent) -> anyhow::Result<()>;
}

/// Drains timer events and forwards them to sinks.
pub struct EventRouter {
    rx: mpsc::UnboundedReceiver<TimerEvent>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl EventRouter {
    /// Creates a router with no sinks.
    pub fn new(rx: mpsc::UnboundedReceiver<TimerEvent>) -> Self {
        Self {
            rx,
            sinks: Vec::new(),
        }
    }

    /// Registers a sink. Sinks receive events in registration order.
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Forwards events until the channel closes. Returns the number of
    /// events routed.
    pub async fn run(mut self) -> u64 {
        let mut routed = 0u64;
        while let Some(event) = self.rx.recv().await {
            self.dispatch(&event);
            routed += 1;
        }
        debug!(routed, "event channel closed, router stopped");
        routed
    }

    /// Hands `event` to every sink.
    pub fn dispatch(&mut self, event: &TimerEvent) {
        for sink in &mut self.sinks {
            if let Err(e) = sink.handle(event) {
                warn!(sink = sink.name(), error = %e, "event sink failed");
            }
        }
    }
}

impl std::fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&'static str> = self.sinks.iter().map(|s| s.name()).collect();
        f.debug_struct("EventRouter")
            .field("sinks", &names)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Phase, Tick};
    use std::sync::{Arc, Mutex};

    struct Recorder {
        seen: Arc<Mutex<Vec<TimerEvent>>>,
    }

    impl EventSink for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn handle(&mut self, event: &TimerEvent) -> anyhow::Result<()> {
            self.seen.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    struct Failing;

    impl EventSink for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn handle(&mut self, _event: &TimerEvent) -> anyhow::Result<()> {
            anyhow::bail!("sink unavailable")
        }
    }

    fn tick(remaining: i64) -> TimerEvent {
        TimerEvent::Tick(Tick {
            phase: Phase::Work,
            remaining_seconds: remaining,
            round: 1,
            total_rounds: 1,
        })
    }

    #[tokio::test]
    async fn test_routes_to_every_sink_in_order() {
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));
        let (tx, rx) = mpsc::unbounded_channel();
        let router = EventRouter::new(rx)
            .with_sink(Recorder {
                seen: Arc::clone(&first),
            })
            .with_sink(Recorder {
                seen: Arc::clone(&second),
            });

        tx.send(tick(2)).unwrap();
        tx.send(tick(1)).unwrap();
        drop(tx);

        assert_eq!(router.run().await, 2);
        assert_eq!(*first.lock().unwrap(), vec![tick(2), tick(1)]);
        assert_eq!(*second.lock().unwrap(), vec![tick(2), tick(1)]);
    }

    #[tokio::test]
    async fn test_failing_sink_does_not_block_others() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (tx, rx) = mpsc::unbounded_channel();
        let router = EventRouter::new(rx).with_sink(Failing).with_sink(Recorder {
            seen: Arc::clone(&seen),
        });

        tx.send(tick(5)).unwrap();
        drop(tx);
        router.run().await;

        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_without_sinks_drains_channel() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(TimerEvent::SessionCompleted { completed_rounds: 1 })
            .unwrap();
        drop(tx);
        assert_eq!(EventRouter::new(rx).run().await, 1);
    }

    #[test]
    fn test_debug_lists_sinks() {
        let (_tx, rx) = mpsc::unbounded_channel();
        let router = EventRouter::new(rx).with_sink(Failing);
        assert!(format!("{:?}", router).contains("failing"));
    }
}
