use crate::domain::LobbyEvent;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Engine side of the outbound event queue
pub type EventSender = mpsc::UnboundedSender<LobbyEvent>;

/// Consumer side of the outbound event queue
pub type EventReceiver = mpsc::UnboundedReceiver<LobbyEvent>;

/// Create the queue connecting an engine to its emitter
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Delivery errors reported by an emitter
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Subscriber channel closed")]
    ChannelClosed,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Delivers lobby events to interested subscribers (push, pub-sub, ...)
#[async_trait]
pub trait EventEmitter: Send + Sync {
    async fn emit(&self, event: LobbyEvent) -> Result<(), EmitError>;
}

/// Drain `receiver` into `emitter` until every sender is gone.
///
/// Failed deliveries are logged and skipped. Returns the number of events
/// delivered successfully.
pub async fn forward_events<E>(mut receiver: EventReceiver, emitter: &E) -> usize
where
    E: EventEmitter + ?Sized,
{
    let mut delivered = 0;

    while let Some(event) = receiver.recv().await {
        let name = event.name();
        let lobby_id = event.lobby_id();

        match emitter.emit(event).await {
            Ok(()) => {
                debug!(event = name, %lobby_id, "Event delivered");
                delivered += 1;
            }
            Err(e) => warn!(event = name, %lobby_id, error = %e, "Event delivery failed"),
        }
    }

    debug!(delivered, "Event queue closed");
    delivered
}

/// Run `forward_events` on its own task
pub fn spawn_event_forwarder<E>(receiver: EventReceiver, emitter: Arc<E>) -> JoinHandle<usize>
where
    E: EventEmitter + ?Sized + 'static,
{
    tokio::spawn(async move { forward_events(receiver, emitter.as_ref()).await })
}
