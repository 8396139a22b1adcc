//! MQTT adapter error types.

use verdant_domain::error::VerdantError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The rumqttc client rejected the publish request.
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),

    /// The publish request was not accepted within the configured timeout.
    #[error("MQTT publish timed out")]
    Timeout(#[source] tokio::time::error::Elapsed),
}

impl From<MqttError> for VerdantError {
    fn from(err: MqttError) -> Self {
        VerdantError::Bus(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_convert_timeout_to_bus_error() {
        let elapsed = tokio::time::timeout(std::time::Duration::ZERO, std::future::pending::<()>())
            .await
            .unwrap_err();
        let err: VerdantError = MqttError::Timeout(elapsed).into();
        assert!(matches!(err, VerdantError::Bus(_)));
        assert_eq!(err.to_string(), "bus error");
    }
}
