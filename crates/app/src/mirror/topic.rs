//! Canonical topic names.
//!
//! Two topic families exist per entity:
//!
//! - discovery: `<prefix>/<component>/<kind>_<external_id>_<message_type>/config`
//! - state:     `<kind-plural>/<external_id>/state`
//!
//! Both are pure functions of entity identity, which is what makes the full
//! resync idempotent: re-deriving names for the same entity can only land on
//! the same topics. External ids are separator-free by construction
//! (enforced in [`identity`](super::identity)), so distinct
//! `(component, kind, external_id, message_type)` tuples never collide.

use super::identity::{EntityKind, ExternalId};

/// Discovery component, the second segment of a discovery topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    /// Free-form valued descriptor.
    Sensor,
    /// Boolean-valued descriptor.
    BinarySensor,
}

impl Component {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sensor => "sensor",
            Self::BinarySensor => "binary_sensor",
        }
    }
}

/// Object id shared by a descriptor's discovery topic and device identifier:
/// `<kind>_<external_id>_<message_type>`.
#[must_use]
pub fn object_id(kind: EntityKind, external_id: &ExternalId, message_type: &str) -> String {
    format!("{kind}_{external_id}_{message_type}")
}

/// Discovery-config topic for one descriptor.
#[must_use]
pub fn discovery(
    prefix: &str,
    component: Component,
    kind: EntityKind,
    external_id: &ExternalId,
    message_type: &str,
) -> String {
    format!(
        "{prefix}/{}/{}/config",
        component.as_str(),
        object_id(kind, external_id, message_type)
    )
}

/// State topic shared by all descriptors of one entity.
#[must_use]
pub fn state(kind: EntityKind, external_id: &ExternalId) -> String {
    format!("{}/{external_id}/state", kind.state_root())
}
