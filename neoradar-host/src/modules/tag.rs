use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use neoradar_sdk::tag::{
    DropdownActionEvent, DropdownDefinition, TagActionDefinition, TagActionEvent, TagApi,
    TagContext, TagItemDefinition,
};

use super::{read, write};
use crate::queue::EventQueue;

#[derive(Debug, Default)]
struct Registrations {
    items: BTreeMap<String, TagItemDefinition>,
    actions: BTreeMap<String, TagActionDefinition>,
    dropdowns: BTreeMap<String, DropdownDefinition>,
    /// (item id, callsign) -> latest value
    values: HashMap<(String, String), TagContext>,
}

/// Tag items, actions and dropdowns registered by plugins.
///
/// Ids are `<owner>:<kind>:<name>`, where the owner is the plugin session
/// that registered them. Names are unique per owner and kind.
#[derive(Debug)]
pub struct TagStore {
    state: RwLock<Registrations>,
    queue: EventQueue,
}

fn id(owner: &str, kind: &str, name: &str) -> String {
    format!("{owner}:{kind}:{name}")
}

impl TagStore {
    pub fn new(queue: EventQueue) -> Self {
        Self {
            state: RwLock::new(Registrations::default()),
            queue,
        }
    }

    fn register_item(&self, owner: &str, definition: &TagItemDefinition) -> Option<String> {
        let id = id(owner, "item", &definition.name);
        let mut state = write(&self.state);
        if definition.name.is_empty() || state.items.contains_key(&id) {
            return None;
        }
        state.items.insert(id.clone(), definition.clone());
        Some(id)
    }

    fn register_action(
        &self,
        owner: &str,
        definition: &TagActionDefinition,
    ) -> Option<String> {
        let id = id(owner, "action", &definition.name);
        let mut state = write(&self.state);
        if definition.name.is_empty() || state.actions.contains_key(&id) {
            return None;
        }
        state.actions.insert(id.clone(), definition.clone());
        Some(id)
    }

    fn register_dropdown(
        &self,
        owner: &str,
        definition: &DropdownDefinition,
    ) -> Option<String> {
        let id = id(owner, "dropdown", &definition.name);
        let mut state = write(&self.state);
        if definition.name.is_empty()
            || definition.options.is_empty()
            || state.dropdowns.contains_key(&id)
        {
            return None;
        }
        state.dropdowns.insert(id.clone(), definition.clone());
        Some(id)
    }

    /// Only the owner of an item may write its values
    fn update_value(&self, owner: &str, item_id: &str, context: &TagContext) -> bool {
        let owned = item_id
            .strip_prefix(owner)
            .is_some_and(|rest| rest.starts_with(':'));
        if !owned {
            tracing::debug!(
                plugin = %owner,
                item = %item_id,
                "Tag value rejected: not the item owner"
            );
            return false;
        }
        let mut state = write(&self.state);
        if !state.items.contains_key(item_id) {
            return false;
        }
        state.values.insert(
            (item_id.to_string(), context.callsign.clone()),
            context.clone(),
        );
        true
    }

    /// Value currently shown by an item for an aircraft, falling back to the
    /// item's default value. `None` if the item is unknown.
    pub fn value(&self, item_id: &str, callsign: &str) -> Option<String> {
        let state = read(&self.state);
        let item = state.items.get(item_id)?;
        let value = state
            .values
            .get(&(item_id.to_string(), callsign.to_string()))
            .map_or_else(|| item.default_value.clone(), |c| c.value.clone());
        Some(value)
    }

    /// The user clicked a registered action. `false` for unknown actions or
    /// missing input on an action that requires it.
    pub fn trigger_action(
        &self,
        tag_id: &str,
        action_id: &str,
        callsign: &str,
        input: Option<&str>,
    ) -> bool {
        let state = write(&self.state);
        let Some(action) = state.actions.get(action_id) else {
            return false;
        };
        if action.requires_input && input.is_none() {
            return false;
        }
        self.queue.push(TagActionEvent {
            tag_id: tag_id.to_string(),
            callsign: callsign.to_string(),
            action_id: action_id.to_string(),
            input: input.map(str::to_string),
        });
        true
    }

    /// The user picked `value` in a registered dropdown. `false` unless the
    /// value is one of the dropdown's options.
    pub fn select_dropdown(&self, dropdown_id: &str, callsign: &str, value: &str) -> bool {
        let state = write(&self.state);
        let Some(dropdown) = state.dropdowns.get(dropdown_id) else {
            return false;
        };
        if !dropdown.options.iter().any(|o| o == value) {
            return false;
        }
        self.queue.push(DropdownActionEvent {
            dropdown_id: dropdown_id.to_string(),
            callsign: callsign.to_string(),
            value: value.to_string(),
        });
        true
    }
}

/// [`TagApi`] for one plugin session, registering under its name
#[derive(Debug, Clone)]
pub struct ScopedTags {
    store: Arc<TagStore>,
    owner: String,
}

impl ScopedTags {
    pub fn new(store: Arc<TagStore>, owner: impl Into<String>) -> Self {
        Self {
            store,
            owner: owner.into(),
        }
    }
}

impl TagApi for ScopedTags {
    fn register_tag_item(&self, definition: &TagItemDefinition) -> Option<String> {
        self.store.register_item(&self.owner, definition)
    }

    fn register_tag_action(&self, definition: &TagActionDefinition) -> Option<String> {
        self.store.register_action(&self.owner, definition)
    }

    fn register_dropdown(&self, definition: &DropdownDefinition) -> Option<String> {
        self.store.register_dropdown(&self.owner, definition)
    }

    fn update_tag_value(&self, item_id: &str, context: &TagContext) -> bool {
        self.store.update_value(&self.owner, item_id, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> TagItemDefinition {
        TagItemDefinition {
            name: name.to_string(),
            default_value: "---".to_string(),
        }
    }

    fn context(callsign: &str, value: &str) -> TagContext {
        TagContext {
            callsign: callsign.to_string(),
            value: value.to_string(),
            colour: None,
        }
    }

    #[test]
    fn test_duplicate_name_is_rejected_per_owner() {
        let store = Arc::new(TagStore::new(EventQueue::new()));
        let tags = ScopedTags::new(store.clone(), "cdm");

        let id = tags.register_tag_item(&item("TOBT")).unwrap();
        assert_eq!(id, "cdm:item:TOBT");
        assert!(tags.register_tag_item(&item("TOBT")).is_none());
        assert!(
            ScopedTags::new(store, "other")
                .register_tag_item(&item("TOBT"))
                .is_some()
        );
    }

    #[test]
    fn test_update_value_and_default() {
        let store = Arc::new(TagStore::new(EventQueue::new()));
        let tags = ScopedTags::new(store.clone(), "cdm");
        let id = tags.register_tag_item(&item("TOBT")).unwrap();

        assert_eq!(store.value(&id, "BAW123").as_deref(), Some("---"));
        assert!(tags.update_tag_value(&id, &context("BAW123", "1205")));
        assert_eq!(store.value(&id, "BAW123").as_deref(), Some("1205"));
        assert!(!tags.update_tag_value("cdm:item:NOPE", &context("BAW123", "x")));
    }

    #[test]
    fn test_other_session_cannot_write_foreign_item() {
        let store = Arc::new(TagStore::new(EventQueue::new()));
        let cdm = ScopedTags::new(store.clone(), "cdm");
        let id = cdm.register_tag_item(&item("TOBT")).unwrap();

        let intruder = ScopedTags::new(store.clone(), "intruder");
        assert!(!intruder.update_tag_value(&id, &context("BAW123", "1300")));
        // Owner name that is only a prefix of the real owner
        let prefix = ScopedTags::new(store.clone(), "cd");
        assert!(!prefix.update_tag_value(&id, &context("BAW123", "1300")));
        assert_eq!(store.value(&id, "BAW123").as_deref(), Some("---"));
    }

    #[test]
    fn test_dropdown_needs_options() {
        let store = Arc::new(TagStore::new(EventQueue::new()));
        let tags = ScopedTags::new(store.clone(), "cdm");
        let empty = DropdownDefinition {
            name: "stand".to_string(),
            options: Vec::new(),
        };
        assert!(tags.register_dropdown(&empty).is_none());
    }

    #[test]
    fn test_user_actions_queue_events() {
        let queue = EventQueue::new();
        let store = Arc::new(TagStore::new(queue.clone()));
        let tags = ScopedTags::new(store.clone(), "cdm");
        let action = tags
            .register_tag_action(&TagActionDefinition {
                name: "ready".to_string(),
                requires_input: true,
            })
            .unwrap();
        let dropdown = tags
            .register_dropdown(&DropdownDefinition {
                name: "stand".to_string(),
                options: vec!["A1".to_string(), "A2".to_string()],
            })
            .unwrap();

        assert!(!store.trigger_action("tag", &action, "BAW123", None));
        assert!(store.trigger_action("tag", &action, "BAW123", Some("1210")));
        assert!(!store.select_dropdown(&dropdown, "BAW123", "B9"));
        assert!(store.select_dropdown(&dropdown, "BAW123", "A2"));

        let kinds: Vec<&str> = queue.drain().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, ["TagAction", "TagDropdownAction"]);
    }
}
