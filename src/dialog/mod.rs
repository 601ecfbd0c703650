//! Dialog registry — the entity ↔ dialog binding table.
//!
//! A dialog is a client-assigned identifier grouping the entities it cares
//! about; it is the proxy's event fan-out unit. The registry keeps both
//! directions of the relation as parallel indices so bulk removal never
//! walks the whole table.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::ari::{EntityKind, Event};

/// One bound entity.
pub type Entity = (EntityKind, String);

/// Binding-table contract. Mutators are serialized; readers may run
/// concurrently with each other. All operations are idempotent.
pub trait Manager: Send + Sync {
    /// Bind an entity to a dialog. Re-binding an existing pair is a no-op.
    fn bind(&self, dialog: &str, kind: EntityKind, id: &str);

    /// Unbind one pair. Unbinding a non-existent pair is a no-op.
    fn unbind(&self, dialog: &str, kind: EntityKind, id: &str);

    /// Dialogs bound to one entity.
    fn dialogs_for_entity(&self, kind: EntityKind, id: &str) -> Vec<String>;

    /// Union of dialogs bound to any entity the event references. Empty for
    /// events with no bound entities.
    fn dialogs_for_event(&self, event: &Event) -> Vec<String>;

    /// Remove every binding of one dialog.
    fn remove(&self, dialog: &str);

    /// Remove every binding referencing one entity, across all dialogs.
    fn unbind_entity(&self, kind: EntityKind, id: &str);
}

#[derive(Debug, Default)]
struct Indices {
    by_dialog: HashMap<String, HashSet<Entity>>,
    by_entity: HashMap<Entity, HashSet<String>>,
}

/// In-memory binding table. Process-local; contents die with the proxy.
#[derive(Debug, Default)]
pub struct MemoryManager {
    inner: RwLock<Indices>,
}

impl MemoryManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Manager for MemoryManager {
    fn bind(&self, dialog: &str, kind: EntityKind, id: &str) {
        let entity: Entity = (kind, id.to_string());
        let mut inner = self.inner.write().expect("dialog index poisoned");
        inner
            .by_dialog
            .entry(dialog.to_string())
            .or_default()
            .insert(entity.clone());
        inner
            .by_entity
            .entry(entity)
            .or_default()
            .insert(dialog.to_string());
    }

    fn unbind(&self, dialog: &str, kind: EntityKind, id: &str) {
        let entity: Entity = (kind, id.to_string());
        let mut inner = self.inner.write().expect("dialog index poisoned");
        if let Some(entities) = inner.by_dialog.get_mut(dialog) {
            entities.remove(&entity);
            if entities.is_empty() {
                inner.by_dialog.remove(dialog);
            }
        }
        if let Some(dialogs) = inner.by_entity.get_mut(&entity) {
            dialogs.remove(dialog);
            if dialogs.is_empty() {
                inner.by_entity.remove(&entity);
            }
        }
    }

    fn dialogs_for_entity(&self, kind: EntityKind, id: &str) -> Vec<String> {
        let entity: Entity = (kind, id.to_string());
        let inner = self.inner.read().expect("dialog index poisoned");
        inner
            .by_entity
            .get(&entity)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn dialogs_for_event(&self, event: &Event) -> Vec<String> {
        let inner = self.inner.read().expect("dialog index poisoned");
        let mut dialogs: HashSet<&String> = HashSet::new();
        for (kind, id) in event.entity_refs() {
            if let Some(set) = inner.by_entity.get(&(kind, id)) {
                dialogs.extend(set.iter());
            }
        }
        dialogs.into_iter().cloned().collect()
    }

    fn remove(&self, dialog: &str) {
        let mut inner = self.inner.write().expect("dialog index poisoned");
        let Some(entities) = inner.by_dialog.remove(dialog) else {
            return;
        };
        for entity in entities {
            if let Some(dialogs) = inner.by_entity.get_mut(&entity) {
                dialogs.remove(dialog);
                if dialogs.is_empty() {
                    inner.by_entity.remove(&entity);
                }
            }
        }
    }

    fn unbind_entity(&self, kind: EntityKind, id: &str) {
        let entity: Entity = (kind, id.to_string());
        let mut inner = self.inner.write().expect("dialog index poisoned");
        let Some(dialogs) = inner.by_entity.remove(&entity) else {
            return;
        };
        for dialog in dialogs {
            if let Some(entities) = inner.by_dialog.get_mut(&dialog) {
                entities.remove(&entity);
                if entities.is_empty() {
                    inner.by_dialog.remove(&dialog);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn channel_event(id: &str) -> Event {
        Event::new("ChannelHangupRequest", json!({"channel": {"id": id}}))
    }

    #[test]
    fn test_bind_is_idempotent() {
        let m = MemoryManager::new();
        m.bind("d-9", EntityKind::Channel, "c-17");
        m.bind("d-9", EntityKind::Channel, "c-17");

        assert_eq!(
            m.dialogs_for_entity(EntityKind::Channel, "c-17"),
            vec!["d-9".to_string()]
        );
    }

    #[test]
    fn test_unbind_removes_both_directions() {
        let m = MemoryManager::new();
        m.bind("d-9", EntityKind::Channel, "c-17");
        m.unbind("d-9", EntityKind::Channel, "c-17");

        assert!(m.dialogs_for_entity(EntityKind::Channel, "c-17").is_empty());
        assert!(m.dialogs_for_event(&channel_event("c-17")).is_empty());
    }

    #[test]
    fn test_unbind_missing_pair_is_noop() {
        let m = MemoryManager::new();
        m.unbind("d-9", EntityKind::Bridge, "b-1");
        assert!(m.dialogs_for_entity(EntityKind::Bridge, "b-1").is_empty());
    }

    #[test]
    fn test_dialogs_for_event_unions_entities() {
        let m = MemoryManager::new();
        m.bind("d-1", EntityKind::Channel, "c-17");
        m.bind("d-2", EntityKind::Bridge, "b-2");
        m.bind("d-2", EntityKind::Channel, "c-17");

        let e = Event::new(
            "ChannelEnteredBridge",
            json!({"channel": {"id": "c-17"}, "bridge": {"id": "b-2"}}),
        );
        let mut dialogs = m.dialogs_for_event(&e);
        dialogs.sort();
        assert_eq!(dialogs, vec!["d-1".to_string(), "d-2".to_string()]);
    }

    #[test]
    fn test_dialogs_for_event_empty_when_unbound() {
        let m = MemoryManager::new();
        m.bind("d-1", EntityKind::Channel, "c-1");
        assert!(m.dialogs_for_event(&channel_event("c-other")).is_empty());
    }

    #[test]
    fn test_kind_distinguishes_same_id() {
        let m = MemoryManager::new();
        m.bind("d-1", EntityKind::Channel, "x");
        assert!(m.dialogs_for_entity(EntityKind::Bridge, "x").is_empty());
    }

    #[test]
    fn test_remove_drops_all_bindings() {
        let m = MemoryManager::new();
        m.bind("d-1", EntityKind::Channel, "c-1");
        m.bind("d-1", EntityKind::Playback, "p-1");
        m.bind("d-2", EntityKind::Channel, "c-1");

        m.remove("d-1");

        assert_eq!(
            m.dialogs_for_entity(EntityKind::Channel, "c-1"),
            vec!["d-2".to_string()]
        );
        assert!(m.dialogs_for_entity(EntityKind::Playback, "p-1").is_empty());
    }

    #[test]
    fn test_unbind_entity_sweeps_all_dialogs() {
        let m = MemoryManager::new();
        m.bind("d-1", EntityKind::Channel, "c-1");
        m.bind("d-2", EntityKind::Channel, "c-1");
        m.bind("d-2", EntityKind::Bridge, "b-1");

        m.unbind_entity(EntityKind::Channel, "c-1");

        assert!(m.dialogs_for_entity(EntityKind::Channel, "c-1").is_empty());
        assert_eq!(
            m.dialogs_for_entity(EntityKind::Bridge, "b-1"),
            vec!["d-2".to_string()]
        );
    }
}
