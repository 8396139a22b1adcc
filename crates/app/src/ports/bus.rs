//! Bus port — retained publish/clear on the message bus.

use std::future::Future;

use verdant_domain::error::VerdantError;

/// Publishes retained messages to the external bus.
///
/// The implementation owns a single long-lived connection established at
/// process start; publishing must never require a new handshake. A retained
/// message persists on the broker until overwritten or cleared, so every
/// publish through this port is a self-contained idempotent write to one
/// topic — callers need no multi-topic transaction.
pub trait RetainedPublisher: Send + Sync {
    /// Publish `payload` to `topic` with the retain flag set.
    fn publish_retained(
        &self,
        topic: &str,
        payload: Vec<u8>,
    ) -> impl Future<Output = Result<(), VerdantError>> + Send;

    /// Publish a retained empty payload to `topic`, the bus-standard idiom
    /// for deleting a retained message observer-side.
    fn clear_retained(&self, topic: &str)
    -> impl Future<Output = Result<(), VerdantError>> + Send;
}

impl<T: RetainedPublisher> RetainedPublisher for std::sync::Arc<T> {
    fn publish_retained(
        &self,
        topic: &str,
        payload: Vec<u8>,
    ) -> impl Future<Output = Result<(), VerdantError>> + Send {
        (**self).publish_retained(topic, payload)
    }

    fn clear_retained(
        &self,
        topic: &str,
    ) -> impl Future<Output = Result<(), VerdantError>> + Send {
        (**self).clear_retained(topic)
    }
}
