//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod farm_service;
pub mod floor_service;
pub mod harvest_service;
pub mod plant_service;
pub mod pot_service;
