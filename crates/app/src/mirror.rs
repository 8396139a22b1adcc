//! Bus mirror core.
//!
//! Mirrors a subset of the persisted state (farms, plants, plus a synthetic
//! server-liveness entity) onto a retained-topic publish/subscribe bus using
//! the self-describing discovery convention understood by home-automation
//! hubs. The pipeline is:
//!
//! ```text
//! storage ports → MirrorService (resync + hooks)
//!               → descriptor (payload builders)
//!               → topic + identity (naming)
//!               → RetainedPublisher port → broker
//! ```
//!
//! Everything below `MirrorService` is a pure function of an entity
//! snapshot, so republishing an unchanged entity reproduces byte-identical
//! retained payloads.

pub mod descriptor;
pub mod identity;
pub mod service;
pub mod topic;

pub use service::MirrorService;
