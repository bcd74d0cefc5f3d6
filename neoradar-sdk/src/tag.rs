//! Radar tag capability module
//!
//! Plugins register tag items (text shown in aircraft labels), actions
//! (clickable) and dropdowns. The host returns an opaque id for each
//! registration and reports user interaction through tag events.

use serde::{Deserialize, Serialize};

/// A text item a plugin can fill in aircraft tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagItemDefinition {
    /// Unique name within the plugin, shown in the tag editor
    pub name: String,
    /// Text shown before the plugin sets a value
    pub default_value: String,
}

/// A clickable action on a tag item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagActionDefinition {
    pub name: String,
    /// True if the action asks the user for free text before firing
    pub requires_input: bool,
}

/// A dropdown menu attached to a tag item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownDefinition {
    pub name: String,
    pub options: Vec<String>,
}

/// New value of a tag item for one aircraft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagContext {
    pub callsign: String,
    pub value: String,
    /// RGB override; `None` keeps the tag's default colour
    pub colour: Option<[u8; 3]>,
}

// ─── Events ──────────────────────────────────────────────────────────

/// The user triggered a registered tag action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagActionEvent {
    pub tag_id: String,
    pub callsign: String,
    pub action_id: String,
    /// Text the user entered, for actions that require input
    pub input: Option<String>,
}

/// The user picked an entry in a registered dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownActionEvent {
    pub dropdown_id: String,
    pub callsign: String,
    pub value: String,
}

// ─── Capability ──────────────────────────────────────────────────────

pub trait TagApi: Send + Sync {
    /// Register a tag item; `None` if the name is already taken
    fn register_tag_item(&self, definition: &TagItemDefinition) -> Option<String>;

    /// Register a tag action; `None` if the name is already taken
    fn register_tag_action(&self, definition: &TagActionDefinition) -> Option<String>;

    /// Register a dropdown; `None` if the name is taken or it has no options
    fn register_dropdown(&self, definition: &DropdownDefinition) -> Option<String>;

    /// Set the value of a registered item for one aircraft
    fn update_tag_value(&self, item_id: &str, context: &TagContext) -> bool;
}
