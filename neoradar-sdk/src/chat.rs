//! Chat capability module

use serde::{Deserialize, Serialize};

/// A text message on a radio frequency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyMessageReceivedEvent {
    /// Frequency in kHz
    pub frequency: u32,
    pub sent_from: String,
    pub message: String,
}

/// A message attached to a flight plan (for example a pilot request)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightplanMessageReceivedEvent {
    pub callsign: String,
    pub sent_from: String,
    pub message: String,
}

/// ATIS text received from a station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ATISInfoMessageReceivedEvent {
    pub sent_from: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateMessageReceivedEvent {
    pub sent_from: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastMessageReceivedEvent {
    pub sent_from: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisorMessageReceivedEvent {
    pub sent_from: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMessageReceivedEvent {
    pub sent_from: String,
    pub message: String,
}

/// A message on the ATC coordination channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtcMessageReceivedEvent {
    pub sent_from: String,
    pub message: String,
}

/// Outgoing text messages.
///
/// Each call returns `false` if the host refused to send (not connected, empty
/// message, unknown recipient).
pub trait ChatApi: Send + Sync {
    /// Send a private message to another station
    fn send_private_message(&self, to: &str, message: &str) -> bool;

    /// Transmit a text message on a frequency (kHz)
    fn send_frequency_message(&self, frequency: u32, message: &str) -> bool;

    /// Send a message on the ATC coordination channel
    fn send_atc_message(&self, message: &str) -> bool;

    /// Broadcast a message to all stations (supervisor privileges)
    fn send_broadcast_message(&self, message: &str) -> bool;

    /// Show a message in the local chat window only; nothing is transmitted
    fn display_client_message(&self, channel: &str, sender: &str, message: &str) -> bool;
}
