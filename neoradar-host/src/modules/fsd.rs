use std::sync::RwLock;

use neoradar_sdk::fsd::{
    ConnectionModel, ConnectionState, FsdApi, FsdConnectedEvent, FsdConnectionModelUpdatedEvent,
    FsdConnectionStateChangeEvent, FsdDisconnectedEvent, FsdErrorEvent,
};

use super::{read, write};
use crate::queue::EventQueue;

#[derive(Debug, Default)]
struct Connection {
    state: ConnectionState,
    model: Option<ConnectionModel>,
}

/// The client's FSD network connection
#[derive(Debug)]
pub struct FsdStore {
    connection: RwLock<Connection>,
    queue: EventQueue,
}

impl FsdStore {
    pub fn new(queue: EventQueue) -> Self {
        Self {
            connection: RwLock::new(Connection::default()),
            queue,
        }
    }

    fn transition(&self, connection: &mut Connection, next: ConnectionState) {
        if connection.state == next {
            return;
        }
        self.queue.push(FsdConnectionStateChangeEvent {
            previous: connection.state,
            current: next,
        });
        connection.state = next;
    }

    /// The client started connecting with `model`
    pub fn begin_connect(&self, model: ConnectionModel) {
        let mut connection = write(&self.connection);
        self.transition(&mut connection, ConnectionState::Connecting);
        connection.model = Some(model.clone());
        self.queue.push(FsdConnectionModelUpdatedEvent { model });
    }

    /// The server accepted the connection. `false` unless connecting.
    pub fn connected(&self) -> bool {
        let mut connection = write(&self.connection);
        if connection.state != ConnectionState::Connecting {
            return false;
        }
        let Some(callsign) = connection.model.as_ref().map(|m| m.callsign.clone()) else {
            return false;
        };
        self.transition(&mut connection, ConnectionState::Connected);
        self.queue.push(FsdConnectedEvent { callsign });
        true
    }

    /// Connection closed. The last model stays readable.
    pub fn disconnected(&self, reason: Option<&str>) -> bool {
        let mut connection = write(&self.connection);
        if connection.state == ConnectionState::Disconnected {
            return false;
        }
        self.transition(&mut connection, ConnectionState::Disconnected);
        self.queue.push(FsdDisconnectedEvent {
            reason: reason.map(str::to_string),
        });
        true
    }

    /// The server reported an error
    pub fn error(&self, code: u32, message: &str) {
        let mut connection = write(&self.connection);
        self.queue.push(FsdErrorEvent {
            code,
            message: message.to_string(),
        });
        self.transition(&mut connection, ConnectionState::Error);
    }

    /// Connection parameters changed while connected (e.g. primary frequency)
    pub fn update_model(&self, model: ConnectionModel) -> bool {
        let mut connection = write(&self.connection);
        if connection.model.is_none() {
            return false;
        }
        connection.model = Some(model.clone());
        self.queue.push(FsdConnectionModelUpdatedEvent { model });
        true
    }
}

impl FsdApi for FsdStore {
    fn connection_state(&self) -> ConnectionState {
        read(&self.connection).state
    }

    fn connection_model(&self) -> Option<ConnectionModel> {
        read(&self.connection).model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ConnectionModel {
        ConnectionModel {
            callsign: "EGLL_APP".to_string(),
            rating: 5,
            frequency: Some(119_725),
            server: "UK-1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_connect_sequence() {
        let queue = EventQueue::new();
        let fsd = FsdStore::new(queue.clone());
        assert!(fsd.connection_model().is_none());

        fsd.begin_connect(model());
        assert!(fsd.connected());
        assert!(fsd.is_connected());

        let kinds: Vec<&str> = queue.drain().iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            [
                "FsdConnectionStateChange",
                "FsdConnectionModelUpdated",
                "FsdConnectionStateChange",
                "FsdConnected"
            ]
        );
    }

    #[test]
    fn test_connected_without_connecting_is_rejected() {
        let fsd = FsdStore::new(EventQueue::new());
        assert!(!fsd.connected());
        assert_eq!(fsd.connection_state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_disconnect_keeps_last_model() {
        let fsd = FsdStore::new(EventQueue::new());
        fsd.begin_connect(model());
        fsd.connected();

        assert!(fsd.disconnected(Some("kicked")));
        assert!(!fsd.disconnected(None));
        assert_eq!(fsd.connection_model().unwrap().callsign, "EGLL_APP");
    }

    #[test]
    fn test_error_moves_to_error_state() {
        let fsd = FsdStore::new(EventQueue::new());
        fsd.begin_connect(model());
        fsd.error(2, "Callsign in use");
        assert_eq!(fsd.connection_state(), ConnectionState::Error);
    }
}
