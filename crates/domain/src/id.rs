//! Typed identifier newtypes backed by store-assigned integers.
//!
//! The persistence layer assigns ids from a monotonically increasing
//! sequence and never recycles them, so an id is a durable handle for the
//! lifetime of the row. External (bus-facing) identity is *derived* from
//! these ids but never equal to them — see the mirror core in the app crate.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw store-assigned id.
            #[must_use]
            pub fn from_i64(value: i64) -> Self {
                Self(value)
            }

            /// Access the raw integer value.
            #[must_use]
            pub fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Farm`](crate::farm::Farm).
    FarmId
);

define_id!(
    /// Unique identifier for a [`Floor`](crate::floor::Floor).
    FloorId
);

define_id!(
    /// Unique identifier for a [`Pot`](crate::pot::Pot).
    PotId
);

define_id!(
    /// Unique identifier for a [`Plant`](crate::plant::Plant).
    PlantId
);

define_id!(
    /// Unique identifier for a [`Harvest`](crate::harvest::Harvest).
    HarvestId
);
