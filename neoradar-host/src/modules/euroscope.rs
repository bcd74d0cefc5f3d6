use std::sync::RwLock;

use neoradar_sdk::euroscope::{
    EuroScopeApi, EuroScopeProxyServerClientConnectedEvent,
    EuroScopeProxyServerClientDisconnectedEvent, EuroScopeProxyServerErrorEvent,
    EuroScopeProxyServerStartEvent, EuroScopeProxyServerStopEvent, ProxyStatus,
};

use super::{read, write};
use crate::queue::EventQueue;

/// State of the EuroScope compatibility proxy
#[derive(Debug)]
pub struct EuroScopeStore {
    status: RwLock<ProxyStatus>,
    queue: EventQueue,
}

impl EuroScopeStore {
    pub fn new(queue: EventQueue) -> Self {
        Self {
            status: RwLock::new(ProxyStatus::default()),
            queue,
        }
    }

    pub fn started(&self, port: u16) -> bool {
        let mut status = write(&self.status);
        if status.running {
            return false;
        }
        status.running = true;
        status.port = Some(port);
        self.queue.push(EuroScopeProxyServerStartEvent { port });
        true
    }

    /// Proxy stopped; every client is dropped with it
    pub fn stopped(&self) -> bool {
        let mut status = write(&self.status);
        if !status.running {
            return false;
        }
        for client in status.clients.drain(..) {
            self.queue
                .push(EuroScopeProxyServerClientDisconnectedEvent { client });
        }
        status.running = false;
        status.port = None;
        self.queue.push(EuroScopeProxyServerStopEvent {});
        true
    }

    pub fn client_connected(&self, client: &str) -> bool {
        let mut status = write(&self.status);
        if !status.running || status.clients.iter().any(|c| c == client) {
            return false;
        }
        status.clients.push(client.to_string());
        self.queue.push(EuroScopeProxyServerClientConnectedEvent {
            client: client.to_string(),
        });
        true
    }

    pub fn client_disconnected(&self, client: &str) -> bool {
        let mut status = write(&self.status);
        let Some(index) = status.clients.iter().position(|c| c == client) else {
            return false;
        };
        status.clients.remove(index);
        self.queue.push(EuroScopeProxyServerClientDisconnectedEvent {
            client: client.to_string(),
        });
        true
    }

    pub fn error(&self, message: &str) {
        let _status = write(&self.status);
        self.queue.push(EuroScopeProxyServerErrorEvent {
            message: message.to_string(),
        });
    }
}

impl EuroScopeApi for EuroScopeStore {
    fn proxy_status(&self) -> ProxyStatus {
        read(&self.status).clone()
    }
}
