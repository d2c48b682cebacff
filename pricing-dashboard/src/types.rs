//! Common type definitions.
//!
//! Every table in the store uses a `BIGINT` surrogate key; the aliases below keep
//! signatures readable and make it obvious which key a function expects.
//!
//! - [`ProjectId`]: `projects.project_id`
//! - [`PersonnelId`]: `personnel.personnel_id`
//! - [`RoleId`]: `roles.role_id`
//! - [`ProjectRoleMappingId`]: `projects_detail.project_role_mapping_id`
//! - [`ReferenceId`]: key of any lookup table (templates, currency, epoch_type, ...)

pub type ProjectId = i64;
pub type PersonnelId = i64;
pub type RoleId = i64;
pub type ProjectRoleMappingId = i64;
pub type ReferenceId = i64;

/// Status assigned to every project created through the dashboard.
pub const DEFAULT_PROJECT_STATUS_ID: ReferenceId = 1;

/// `epoch_value` written for every new role assignment.
pub const DEFAULT_EPOCH_VALUE: i32 = 1;
