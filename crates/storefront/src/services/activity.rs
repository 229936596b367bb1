//! Fire-and-forget activity logging.
//!
//! Handlers hand events to an [`ActivityLogger`], which queues them on a
//! bounded channel and returns immediately. A single background task drains
//! the queue into an [`ActivitySink`]. Nothing on the request path ever waits
//! for, or fails because of, an activity write: a full queue or a failing
//! sink costs the event, logged as an operational warning or error.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use storehaus_core::ActivityEvent;

use crate::db::RepositoryError;

/// Destination for activity events.
pub trait ActivitySink: Send + Sync + 'static {
    /// Persist one event.
    fn record(
        &self,
        event: &ActivityEvent,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Cloneable handle for queueing activity events.
#[derive(Debug, Clone)]
pub struct ActivityLogger {
    tx: mpsc::Sender<ActivityEvent>,
}

impl ActivityLogger {
    /// Start the consumer task and return a handle to it.
    ///
    /// The task exits once every `ActivityLogger` clone has been dropped and
    /// the queue is drained; await the returned handle to flush on shutdown.
    #[must_use]
    pub fn spawn<S: ActivitySink>(sink: S, capacity: usize) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<ActivityEvent>(capacity.max(1));

        info!(capacity, "Spawning activity consumer task");
        let handle = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if let Err(e) = sink.record(&event).await {
                    error!(
                        error = %e,
                        event_type = %event.event_type,
                        correlation = event.correlation_key().as_deref().unwrap_or("anonymous"),
                        "Failed to record activity event"
                    );
                }
            }
            debug!("Activity queue closed, consumer exiting");
        });

        (Self { tx }, handle)
    }

    /// Queue an event without waiting. Never fails the caller.
    pub fn log(&self, event: ActivityEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!(
                    event_type = %event.event_type,
                    correlation = event.correlation_key().as_deref().unwrap_or("anonymous"),
                    "Activity queue full, dropping event"
                );
            }
            Err(TrySendError::Closed(event)) => {
                error!(
                    event_type = %event.event_type,
                    "Activity consumer is gone, dropping event"
                );
            }
        }
    }

    /// Handle whose receiving side the caller drains by hand.
    #[cfg(test)]
    pub(crate) fn detached(capacity: usize) -> (Self, mpsc::Receiver<ActivityEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use storehaus_core::{ActivityEventType, UserId};

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingSink {
        events: Arc<Mutex<Vec<ActivityEvent>>>,
    }

    impl ActivitySink for RecordingSink {
        async fn record(&self, event: &ActivityEvent) -> Result<(), RepositoryError> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    /// Fails every other write.
    #[derive(Clone, Default)]
    struct FlakySink {
        calls: Arc<AtomicUsize>,
        recorded: Arc<Mutex<Vec<ActivityEventType>>>,
    }

    impl ActivitySink for FlakySink {
        async fn record(&self, event: &ActivityEvent) -> Result<(), RepositoryError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
                return Err(RepositoryError::DataCorruption("disk on fire".to_string()));
            }
            self.recorded.lock().unwrap().push(event.event_type);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_events_reach_sink() {
        let sink = RecordingSink::default();
        let (logger, handle) = ActivityLogger::spawn(sink.clone(), 16);

        logger.log(ActivityEvent::new(ActivityEventType::PageView));
        logger.log(
            ActivityEvent::new(ActivityEventType::Purchase).with_user(Some(UserId::new(7))),
        );
        drop(logger);
        handle.await.unwrap();

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().any(|e| e.user_id == Some(UserId::new(7))));
    }

    #[tokio::test]
    async fn test_sink_failure_does_not_stop_consumer() {
        let sink = FlakySink::default();
        let (logger, handle) = ActivityLogger::spawn(sink.clone(), 16);

        logger.log(ActivityEvent::new(ActivityEventType::Search));
        logger.log(ActivityEvent::new(ActivityEventType::Login));
        drop(logger);
        handle.await.unwrap();

        assert_eq!(sink.calls.load(Ordering::SeqCst), 2);
        assert_eq!(*sink.recorded.lock().unwrap(), [ActivityEventType::Login]);
    }

    #[tokio::test]
    async fn test_full_queue_drops_without_blocking() {
        let (logger, mut rx) = ActivityLogger::detached(1);

        logger.log(ActivityEvent::new(ActivityEventType::AddToCart));
        logger.log(ActivityEvent::new(ActivityEventType::CheckoutStart));
        logger.log(ActivityEvent::new(ActivityEventType::Purchase));
        drop(logger);

        let first = rx.recv().await.unwrap();
        assert_eq!(first.event_type, ActivityEventType::AddToCart);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_closed_queue_is_not_an_error() {
        let (logger, rx) = ActivityLogger::detached(4);
        drop(rx);
        logger.log(ActivityEvent::new(ActivityEventType::SignUp));
    }

    #[tokio::test]
    async fn test_zero_capacity_is_clamped() {
        let sink = RecordingSink::default();
        let (logger, handle) = ActivityLogger::spawn(sink.clone(), 0);
        logger.log(ActivityEvent::new(ActivityEventType::PageView));
        drop(logger);
        handle.await.unwrap();
        assert_eq!(sink.events.lock().unwrap().len(), 1);
    }
}
