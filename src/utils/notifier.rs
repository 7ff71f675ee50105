use tokio::net::UdpSocket;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::models::config::NotifyConfig;
use crate::models::event::GameEvent;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("failed to serialize roster: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to send datagram: {0}")]
    Io(#[from] std::io::Error),
    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Queued snapshots beyond this are dropped rather than stalling the request path.
const QUEUE_CAPACITY: usize = 1000;

/// Pushes roster snapshots to live-view clients over UDP.
///
/// Delivery is best effort: one datagram per event, no retry, failures only logged.
/// A single background task drains the queue so datagrams leave in event order.
#[derive(Debug, Clone)]
pub struct SnapshotNotifier {
    config: NotifyConfig,
    queue: Option<mpsc::Sender<GameEvent>>,
}

impl SnapshotNotifier {
    /// Starts the sender task on the current runtime when notifications are enabled.
    pub fn new(config: NotifyConfig) -> Self {
        let queue = if config.enabled {
            match Handle::try_current() {
                Ok(handle) => {
                    let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
                    handle.spawn(drain(config.clone(), rx));
                    Some(tx)
                }
                Err(_) => {
                    log::warn!("no runtime available, roster snapshots disabled");
                    None
                }
            }
        } else {
            None
        };

        Self { config, queue }
    }

    /// Queues every event and returns immediately.
    pub fn dispatch(&self, events: Vec<GameEvent>) {
        let Some(queue) = &self.queue else {
            return;
        };

        for event in events {
            if let Err(e) = queue.try_send(event) {
                log::warn!("snapshot dropped: {}", e);
            }
        }
    }

    /// Sends a single snapshot datagram, bounded by the configured timeout.
    pub async fn send(&self, event: &GameEvent) -> Result<(), NotifyError> {
        send_snapshot(&self.config, event).await
    }
}

async fn drain(config: NotifyConfig, mut rx: mpsc::Receiver<GameEvent>) {
    while let Some(event) = rx.recv().await {
        if let Err(e) = send_snapshot(&config, &event).await {
            log::warn!(
                "{} snapshot not delivered to {}: {}",
                event.kind(),
                config.target(),
                e
            );
        }
    }
}

async fn send_snapshot(config: &NotifyConfig, event: &GameEvent) -> Result<(), NotifyError> {
    let payload = serde_json::to_vec(event.roster())?;
    let target = config.target();

    let send = async {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.send_to(&payload, target.as_str()).await?;
        Ok::<(), NotifyError>(())
    };

    tokio::time::timeout(config.timeout, send)
        .await
        .map_err(|_| NotifyError::Timeout(config.timeout))??;

    log::debug!(
        "{} snapshot ({} bytes) sent to {}",
        event.kind(),
        payload.len(),
        target
    );
    Ok(())
}
