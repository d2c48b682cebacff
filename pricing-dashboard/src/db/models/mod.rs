//! Database record models matching table schemas.
//!
//! These structs correspond to rows read from, or written to, the pricing store. Repositories
//! in [`crate::db::handlers`] return them; API handlers convert them into response models.
//!
//! # Model Categories
//!
//! ## Entities
//!
//! - [`projects`]: Projects and the summaries shown when choosing one to delete
//! - [`personnel`]: Consultants, both the assignable subset and the full directory
//! - [`project_roles`]: Project-role-personnel-epoch assignments (`projects_detail`)
//!
//! ## Lookups
//!
//! - [`reference`]: Read-only reference tables (templates, currencies, epoch types, ...)
//!
//! ## Read-only pages
//!
//! - [`pages`]: Aggregated rows backing the overview pages

pub mod pages;
pub mod personnel;
pub mod project_roles;
pub mod projects;
pub mod reference;
