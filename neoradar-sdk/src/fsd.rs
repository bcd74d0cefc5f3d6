//! FSD network connection capability module

use serde::{Deserialize, Serialize};

use crate::controller::Facility;

/// State of the client's connection to the FSD network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error,
}

/// Parameters of the current (or last) network connection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConnectionModel {
    pub callsign: String,
    pub facility: Facility,
    pub rating: u8,
    /// Primary frequency in kHz, `None` for observers
    pub frequency: Option<u32>,
    pub server: String,
    pub is_observer: bool,
}

// ─── Events ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsdErrorEvent {
    /// FSD protocol error code
    pub code: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsdConnectionStateChangeEvent {
    pub previous: ConnectionState,
    pub current: ConnectionState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsdConnectedEvent {
    pub callsign: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsdDisconnectedEvent {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsdConnectionModelUpdatedEvent {
    pub model: ConnectionModel,
}

// ─── Capability ──────────────────────────────────────────────────────

pub trait FsdApi: Send + Sync {
    fn connection_state(&self) -> ConnectionState;

    /// `None` if the client never connected this session
    fn connection_model(&self) -> Option<ConnectionModel>;

    fn is_connected(&self) -> bool {
        self.connection_state() == ConnectionState::Connected
    }
}
