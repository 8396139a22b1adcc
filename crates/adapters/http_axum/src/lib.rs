//! # verdant-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **REST JSON API** for cultivation assets
//!   (`/api/farms`, `/api/plants`, `/api/harvests`, …)
//! - Expose the mirror resync endpoint (`POST /api/mirror/resync`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses
//!
//! ## Dependency rule
//! Depends on `verdant-app` (for port traits and services) and
//! `verdant-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
