use std::time::Duration;

use serde::Deserialize;

use crate::errors::Error;
use crate::payload::Payload;
use crate::types::MachineStatus;

pub const MACHINE_STATUS_TOPIC: &str = "machine_status";

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionState {
    Connected,
    Disconnected,
    Reconnecting { attempt: u32, delay: Duration },
    GaveUp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PushEvent {
    Connection(ConnectionState),
    MachineStatus(MachineStatus),
    Message { topic: String, payload: Payload },
}

#[derive(Deserialize)]
struct Frame {
    topic: String,
    #[serde(default)]
    payload: Payload,
}

impl PushEvent {
    /// Decodes one `{ "topic": ..., "payload": ... }` text frame.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let frame: Frame = serde_json::from_str(text)?;
        if frame.topic == MACHINE_STATUS_TOPIC {
            let status = serde_json::from_value(frame.payload)?;
            return Ok(PushEvent::MachineStatus(status));
        }
        Ok(PushEvent::Message {
            topic: frame.topic,
            payload: frame.payload,
        })
    }
}
