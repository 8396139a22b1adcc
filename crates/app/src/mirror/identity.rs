//! External identity derivation.
//!
//! Bus-facing names never embed an internal id directly; they go through
//! [`ExternalId`], a stable string derived from the entity kind and its
//! durable internal key. The store never recycles ids, so an external id
//! stays bound to one entity forever.

use std::fmt;

use verdant_domain::id::{FarmId, PlantId};

/// The entity kinds exposed on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Farm,
    Plant,
    /// Synthetic singleton representing process health; not persisted.
    Server,
}

impl EntityKind {
    /// Kind tag used in discovery object ids (`farm_1_status`, …).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Farm => "farm",
            Self::Plant => "plant",
            Self::Server => "server",
        }
    }

    /// First segment of the kind's state topics (`farms/1/state`, …).
    #[must_use]
    pub fn state_root(self) -> &'static str {
        match self {
            Self::Farm => "farms",
            Self::Plant => "plants",
            Self::Server => "server",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable external identifier for one entity.
///
/// Construction is restricted to the derivation functions below, so an
/// external id is guaranteed non-empty and free of topic separators. The
/// per-kind shapes are disjoint (`"7"`, `"id7"`, `"verdant"`), which keeps
/// ids — and everything derived from them, notably descriptor unique ids —
/// collision-free across kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalId(String);

impl ExternalId {
    /// Derive the external id of a farm: the internal id in decimal.
    #[must_use]
    pub fn farm(id: FarmId) -> Self {
        Self(id.as_i64().to_string())
    }

    /// Derive the external id of a plant: the internal id in decimal with
    /// an `id` tag.
    #[must_use]
    pub fn plant(id: PlantId) -> Self {
        Self(format!("id{}", id.as_i64()))
    }

    /// External id of the server-liveness singleton.
    #[must_use]
    pub fn server() -> Self {
        Self("verdant".to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
