//! EuroScope proxy capability module
//!
//! The host can run a proxy server that lets EuroScope instances connect to
//! it as if it were the network.

use serde::{Deserialize, Serialize};

/// Snapshot of the proxy server
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProxyStatus {
    pub running: bool,
    /// Listening port while running
    pub port: Option<u16>,
    /// Addresses of connected EuroScope clients
    pub clients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EuroScopeProxyServerStartEvent {
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EuroScopeProxyServerStopEvent {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EuroScopeProxyServerClientConnectedEvent {
    pub client: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EuroScopeProxyServerClientDisconnectedEvent {
    pub client: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EuroScopeProxyServerErrorEvent {
    pub message: String,
}

pub trait EuroScopeApi: Send + Sync {
    fn proxy_status(&self) -> ProxyStatus;

    fn is_proxy_running(&self) -> bool {
        self.proxy_status().running
    }
}
