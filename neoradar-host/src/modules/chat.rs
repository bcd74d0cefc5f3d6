use std::sync::RwLock;

use neoradar_sdk::chat::{
    ATISInfoMessageReceivedEvent, AtcMessageReceivedEvent, BroadcastMessageReceivedEvent,
    ChatApi, FlightplanMessageReceivedEvent, FrequencyMessageReceivedEvent,
    PrivateMessageReceivedEvent, ServerMessageReceivedEvent, SupervisorMessageReceivedEvent,
};

use super::{read, write};
use crate::queue::EventQueue;

/// A message a plugin asked the client to send or display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingMessage {
    Private { to: String, message: String },
    Frequency { frequency: u32, message: String },
    Atc { message: String },
    Broadcast { message: String },
    /// Shown locally, never transmitted
    Client {
        channel: String,
        sender: String,
        message: String,
    },
}

#[derive(Debug, Default)]
struct Chat {
    outbox: Vec<OutgoingMessage>,
    can_broadcast: bool,
}

/// Text messaging. Outgoing messages collect in an outbox that the network
/// layer drains; incoming ones are queued as events.
#[derive(Debug)]
pub struct ChatStore {
    state: RwLock<Chat>,
    queue: EventQueue,
}

/// Longest message the network accepts, in characters
const MAX_MESSAGE_LEN: usize = 512;

fn acceptable(message: &str) -> bool {
    !message.trim().is_empty() && message.chars().count() <= MAX_MESSAGE_LEN
}

impl ChatStore {
    pub fn new(queue: EventQueue) -> Self {
        Self {
            state: RwLock::new(Chat::default()),
            queue,
        }
    }

    /// Allow or forbid broadcasts, which need supervisor rights
    pub fn set_can_broadcast(&self, allowed: bool) {
        write(&self.state).can_broadcast = allowed;
    }

    /// Take all messages sent since the last call
    pub fn take_outbox(&self) -> Vec<OutgoingMessage> {
        std::mem::take(&mut write(&self.state).outbox)
    }

    pub fn outbox_len(&self) -> usize {
        read(&self.state).outbox.len()
    }

    fn send(&self, message: OutgoingMessage) -> bool {
        write(&self.state).outbox.push(message);
        true
    }

    pub fn receive_frequency(&self, frequency: u32, sent_from: &str, message: &str) {
        self.queue.push(FrequencyMessageReceivedEvent {
            frequency,
            sent_from: sent_from.to_string(),
            message: message.to_string(),
        });
    }

    pub fn receive_flightplan(&self, callsign: &str, sent_from: &str, message: &str) {
        self.queue.push(FlightplanMessageReceivedEvent {
            callsign: callsign.to_string(),
            sent_from: sent_from.to_string(),
            message: message.to_string(),
        });
    }

    pub fn receive_atis(&self, sent_from: &str, lines: Vec<String>) {
        self.queue.push(ATISInfoMessageReceivedEvent {
            sent_from: sent_from.to_string(),
            lines,
        });
    }

    pub fn receive_private(&self, sent_from: &str, message: &str) {
        self.queue.push(PrivateMessageReceivedEvent {
            sent_from: sent_from.to_string(),
            message: message.to_string(),
        });
    }

    pub fn receive_broadcast(&self, sent_from: &str, message: &str) {
        self.queue.push(BroadcastMessageReceivedEvent {
            sent_from: sent_from.to_string(),
            message: message.to_string(),
        });
    }

    pub fn receive_supervisor(&self, sent_from: &str, message: &str) {
        self.queue.push(SupervisorMessageReceivedEvent {
            sent_from: sent_from.to_string(),
            message: message.to_string(),
        });
    }

    pub fn receive_server(&self, sent_from: &str, message: &str) {
        self.queue.push(ServerMessageReceivedEvent {
            sent_from: sent_from.to_string(),
            message: message.to_string(),
        });
    }

    pub fn receive_atc(&self, sent_from: &str, message: &str) {
        self.queue.push(AtcMessageReceivedEvent {
            sent_from: sent_from.to_string(),
            message: message.to_string(),
        });
    }
}

impl ChatApi for ChatStore {
    fn send_private_message(&self, to: &str, message: &str) -> bool {
        if to.is_empty() || !acceptable(message) {
            return false;
        }
        self.send(OutgoingMessage::Private {
            to: to.to_string(),
            message: message.to_string(),
        })
    }

    fn send_frequency_message(&self, frequency: u32, message: &str) -> bool {
        // VHF airband, 118.000 to 136.975 MHz
        if !(118_000..=136_975).contains(&frequency) || !acceptable(message) {
            return false;
        }
        self.send(OutgoingMessage::Frequency {
            frequency,
            message: message.to_string(),
        })
    }

    fn send_atc_message(&self, message: &str) -> bool {
        if !acceptable(message) {
            return false;
        }
        self.send(OutgoingMessage::Atc {
            message: message.to_string(),
        })
    }

    fn send_broadcast_message(&self, message: &str) -> bool {
        if !read(&self.state).can_broadcast || !acceptable(message) {
            return false;
        }
        self.send(OutgoingMessage::Broadcast {
            message: message.to_string(),
        })
    }

    fn display_client_message(&self, channel: &str, sender: &str, message: &str) -> bool {
        if channel.is_empty() || message.is_empty() {
            return false;
        }
        self.send(OutgoingMessage::Client {
            channel: channel.to_string(),
            sender: sender.to_string(),
            message: message.to_string(),
        })
    }
}
