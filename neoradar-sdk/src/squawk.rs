//! Squawk assignment capability module

use serde::{Deserialize, Serialize};

/// A squawk code was assigned to an aircraft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquawkAssignedEvent {
    pub callsign: String,
    pub code: String,
}

/// Returns true if `code` is a four-digit octal transponder code
pub fn is_valid_code(code: &str) -> bool {
    code.len() == 4 && code.bytes().all(|b| (b'0'..=b'7').contains(&b))
}

pub trait SquawkApi: Send + Sync {
    /// Code currently assigned to an aircraft
    fn assigned_code(&self, callsign: &str) -> Option<String>;

    /// Assign a specific code; rejected for unknown callsigns or invalid codes
    fn assign_squawk(&self, callsign: &str, code: &str) -> bool;

    /// Let the host pick a free code and assign it.
    ///
    /// Returns the assigned code, or `None` if the callsign is unknown or no
    /// code is available.
    fn request_squawk(&self, callsign: &str) -> Option<String>;
}
