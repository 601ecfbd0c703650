//! Operation handlers, one module per ARI resource family.
//!
//! Handler contract: decode the typed payload (malformed → *bad-request*),
//! perform one call (or a small fixed sequence) against the ARI client, and
//! return exactly one response. Command kinds with no natural reply return
//! an empty acknowledgement. `*Stage*` kinds only allocate identifiers and
//! never touch the ARI connection.

use super::Core;
use crate::ari::EntityKind;

pub(crate) mod application;
pub(crate) mod asterisk;
pub(crate) mod bridge;
pub(crate) mod channel;
pub(crate) mod device;
pub(crate) mod endpoint;
pub(crate) mod mailbox;
pub(crate) mod playback;
pub(crate) mod recording;
pub(crate) mod sound;

/// Bind the request's dialog to an entity, when a dialog is present.
pub(super) fn bind_dialog(core: &Core, dialog: &str, kind: EntityKind, id: &str) {
    if !dialog.is_empty() {
        core.dialogs.bind(dialog, kind, id);
    }
}

/// Unbind the request's dialog from an entity, when a dialog is present.
pub(super) fn unbind_dialog(core: &Core, dialog: &str, kind: EntityKind, id: &str) {
    if !dialog.is_empty() {
        core.dialogs.unbind(dialog, kind, id);
    }
}

/// Best-effort cleanup after a delete/hangup: drop every binding that
/// referenced the destroyed entity.
pub(super) fn cleanup_entity(core: &Core, kind: EntityKind, id: &str) {
    core.dialogs.unbind_entity(kind, id);
}

/// The entity a subscription event source names, for the bindable kinds.
pub(super) fn event_source_entity(source: &str) -> Option<(EntityKind, &str)> {
    let (kind, id) = source.split_once(':')?;
    match kind {
        "channel" => Some((EntityKind::Channel, id)),
        "bridge" => Some((EntityKind::Bridge, id)),
        "deviceState" => Some((EntityKind::DeviceState, id)),
        _ => None,
    }
}

/// Use the client-supplied identifier, or allocate one for stage handles.
pub(super) fn id_or_new(id: &str) -> String {
    if id.is_empty() {
        uuid::Uuid::new_v4().to_string()
    } else {
        id.to_string()
    }
}
