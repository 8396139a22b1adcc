//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod bus;
pub mod mirror;
pub mod storage;

pub use bus::RetainedPublisher;
pub use mirror::{Mirror, NoopMirror, ResyncSummary};
pub use storage::{
    FarmRepository, FloorRepository, HarvestRepository, PlantRepository, PotRepository,
};
