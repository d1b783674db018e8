use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Alert transport failed: {0}")]
    Transport(String),
}

//delivery settings owned by the transport; the core only checks presence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSettings {
    pub server: String,
    pub recipient: String,
    #[serde(default)]
    pub sender: Option<String>,
}

impl AlertSettings {
    pub fn new(server: impl Into<String>, recipient: impl Into<String>) -> Self {
        AlertSettings {
            server: server.into(),
            recipient: recipient.into(),
            sender: None,
        }
    }
}

//transport that renders and sends one alert
pub trait AlertSink: Send {
    fn deliver(&mut self, settings: &AlertSettings, message: &str) -> Result<(), AlertError>;
}

//writes alerts to the log instead of an external transport
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl AlertSink for LogSink {
    fn deliver(&mut self, settings: &AlertSettings, message: &str) -> Result<(), AlertError> {
        info!(recipient = %settings.recipient, "ALERT: {}", message);
        Ok(())
    }
}
