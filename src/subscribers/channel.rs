//! # Channel forwarder.
//!
//! [`ChannelSubscriber`] bridges the synchronous notification pass to async
//! consumers: every pushed grade is sent into an unbounded
//! [`tokio::sync::mpsc`] channel.
//!
//! ## Rules
//! - Sending never blocks the pass (`UnboundedSender::send`).
//! - Once the receiver is dropped, each update returns `UpdateError::Closed`,
//!   which shows up in the pass report.

use tokio::sync::mpsc;

use crate::Grade;
use crate::error::UpdateError;
use crate::subscribers::Subscribe;

/// Forwards every grade into an mpsc channel.
#[derive(Debug, Clone)]
pub struct ChannelSubscriber {
    name: &'static str,
    tx: mpsc::UnboundedSender<Grade>,
}

impl ChannelSubscriber {
    /// Wraps an existing sender.
    pub fn new(name: &'static str, tx: mpsc::UnboundedSender<Grade>) -> Self {
        Self { name, tx }
    }

    /// Creates a subscriber together with the receiving half.
    pub fn channel(name: &'static str) -> (Self, mpsc::UnboundedReceiver<Grade>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(name, tx), rx)
    }

    /// True once the receiving half has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl Subscribe for ChannelSubscriber {
    fn on_update(&self, grade: Grade) -> Result<(), UpdateError> {
        self.tx.send(grade).map_err(|_| UpdateError::Closed)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_forwards_grades_in_order() {
        let (sub, mut rx) = ChannelSubscriber::channel("chan");
        sub.on_update(3).unwrap();
        sub.on_update(4).unwrap();

        assert_eq!(rx.recv().await, Some(3));
        assert_eq!(rx.recv().await, Some(4));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_closed_receiver_is_reported() {
        let (sub, rx) = ChannelSubscriber::channel("chan");
        drop(rx);

        assert!(sub.is_closed());
        assert_eq!(sub.on_update(1), Err(UpdateError::Closed));
    }
}
