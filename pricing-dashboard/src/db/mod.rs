//! Database layer for data persistence and access.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │  query / execute
//!        ↓
//! ┌─────────────┐
//! │   Gateway   │  (db::gateway - one connection per operation)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - queries, db::cascade - deletion plans)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │  PostgreSQL │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`gateway`]: Connection lifecycle and transaction boundaries
//! - [`handlers`]: Repository implementations
//! - [`cascade`]: Declared deletion plans for projects and personnel
//! - [`models`]: Database record structures matching table schemas
//! - [`errors`]: Database-specific error types
//!
//! # Migrations
//!
//! Schema migrations live in the `migrations/` directory and are exposed through
//! [`crate::migrator`]. They are applied by `pricing-dashboard --migrate` and by the
//! database-backed tests, never implicitly at startup.

pub mod cascade;
pub mod errors;
pub mod gateway;
pub mod handlers;
pub mod models;
