//! # verdant-domain
//!
//! Pure domain model for the verdant cultivation tracker.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Farms** (top-level cultivation sites)
//! - Define **Floors** (levels within a farm)
//! - Define **Pots** (positions on a floor)
//! - Define **Plants** (living assets, optionally assigned to a pot)
//! - Define **Harvests** (yield events recorded against a plant)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod farm;
pub mod floor;
pub mod harvest;
pub mod plant;
pub mod pot;
