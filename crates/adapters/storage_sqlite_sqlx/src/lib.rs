//! # verdant-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `verdant-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! Ids are `INTEGER PRIMARY KEY AUTOINCREMENT` columns, so the store never
//! recycles an id after a delete. Timestamps are stored as RFC 3339 text,
//! calendar dates as ISO 8601 text.
//!
//! ## Dependency rule
//! Depends on `verdant-app` (for port traits) and `verdant-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

pub mod error;
pub mod farm_repo;
pub mod floor_repo;
pub mod harvest_repo;
pub mod plant_repo;
pub mod pool;
pub mod pot_repo;

mod row;

pub use self::error::StorageError;
pub use self::farm_repo::SqliteFarmRepository;
pub use self::floor_repo::SqliteFloorRepository;
pub use self::harvest_repo::SqliteHarvestRepository;
pub use self::plant_repo::SqlitePlantRepository;
pub use self::pool::{Config, Database};
pub use self::pot_repo::SqlitePotRepository;
