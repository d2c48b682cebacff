//! API request and response data models.
//!
//! API models are distinct from the database models in [`crate::db::models`]; read-only rows
//! that need no reshaping (catalog summaries, page aggregates) are returned as they are.
//!
//! - [`forms`]: Form descriptions and numeric field bounds
//! - [`outcome`]: Success body shared by every form submission
//! - [`projects`]: Create-project submission
//! - [`project_roles`]: Assign, update and delete role submissions
//! - [`deletion`]: Cascading delete submissions and their outcomes

pub mod deletion;
pub mod forms;
pub mod outcome;
pub mod project_roles;
pub mod projects;
