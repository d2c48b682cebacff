//! Repository implementations for database access.
//!
//! Each repository wraps a borrowed `PgConnection`, binds every user-supplied value as a
//! parameter and returns models from [`crate::db::models`]. Whether the work is transactional
//! is decided by the [`crate::db::gateway::Gateway`] call the repository is built in.
//!
//! # Available Repositories
//!
//! - [`Projects`]: Project creation, listing and cascading deletion
//! - [`Personnel`]: Cascading deletion of consultants
//! - [`ProjectRoles`]: Role assignments (create, update epoch, delete)
//! - [`Catalogs`]: Reference tables and the lists behind every selection widget
//! - [`Pages`]: Aggregates for the overview pages
//!
//! # Common Pattern
//!
//! ```ignore
//! use pricing_dashboard::db::handlers::{ProjectRoles, Repository};
//!
//! let removed = gateway
//!     .execute(move |conn| Box::pin(async move { ProjectRoles::new(conn).delete(id).await }))
//!     .await?;
//! ```

pub mod catalogs;
pub mod pages;
pub mod personnel;
pub mod project_roles;
pub mod projects;
pub mod repository;

pub use catalogs::Catalogs;
pub use pages::Pages;
pub use personnel::Personnel;
pub use project_roles::ProjectRoles;
pub use projects::Projects;
pub use repository::Repository;
