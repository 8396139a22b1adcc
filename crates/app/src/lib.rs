//! # verdant-app
//!
//! Application layer — use-cases, **port definitions** (traits), and the
//! bus mirror core.
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `FarmRepository`, `FloorRepository`, `PotRepository`,
//!     `PlantRepository`, `HarvestRepository` — CRUD persistence
//!   - `RetainedPublisher` — retained publish/clear on the message bus
//!   - `Mirror` — mutation hooks and full resync for the bus mirror
//! - Provide **use-case services** (`FarmService`, `PlantService`, …) that
//!   orchestrate domain objects without knowing *how* persistence or IO works
//! - Own the **mirror core**: external identity derivation, topic naming,
//!   discovery/state descriptor construction, and the resync orchestrator
//!
//! ## Dependency rule
//! Depends on `verdant-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod mirror;
pub mod ports;
pub mod services;
