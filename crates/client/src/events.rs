//! Out-of-band auth signals.
//!
//! Any layer that sees the server reject the token publishes
//! [`AuthEvent::Unauthorized`]; [`SessionState`](crate::session::SessionState)
//! listens and drops local credentials.

use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// The server answered 401.
    Unauthorized,
}

/// Broadcast channel for [`AuthEvent`]s. Clones share the channel.
#[derive(Debug, Clone)]
pub struct AuthEvents {
    sender: broadcast::Sender<AuthEvent>,
}

impl AuthEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.sender.subscribe()
    }

    /// Publish [`AuthEvent::Unauthorized`]. Without subscribers the event is dropped.
    pub fn publish_unauthorized(&self) {
        let receivers = self.sender.send(AuthEvent::Unauthorized).unwrap_or(0);
        tracing::debug!(receivers, "Unauthorized event published");
    }
}

impl Default for AuthEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_unauthorized() {
        let events = AuthEvents::new();
        let mut rx = events.subscribe();
        events.clone().publish_unauthorized();
        assert_eq!(rx.recv().await.unwrap(), AuthEvent::Unauthorized);
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        AuthEvents::new().publish_unauthorized();
    }
}
