//! HTTP handlers for the Assign Project Roles and Update Project Roles tabs, and the Delete
//! Project Role section of Deletion Management.

use crate::{
    AppState,
    api::models::{
        forms::{FormField, FormSpec, NumberBounds},
        outcome::FormOutcome,
        project_roles::{ProjectRolesForm, RoleAssignmentCreate, RoleDelete, RoleUpdate},
    },
    catalog::Catalog,
    db::{
        errors::{DbError, Result as DbResult},
        handlers::{Catalogs, ProjectRoles, Projects, Repository},
        models::{
            personnel::AssignablePersonnel,
            project_roles::{ProjectRoleCreateDBRequest, ProjectRoleDetail, ProjectRoleUpdateDBRequest},
            projects::{ProjectDBResponse, ProjectFilter},
            reference::{ReferenceItem, ReferenceTable},
        },
    },
    errors::{Error, Result},
    shell::{DeletionTab, Tab},
    types::ProjectRoleMappingId,
};
use axum::{Json, extract::State, http::StatusCode};
use sqlx::PgConnection;

struct AssignmentOptions {
    projects: Catalog<ProjectDBResponse>,
    personnel: Catalog<AssignablePersonnel>,
    roles: Catalog<ReferenceItem>,
}

async fn load_assignment_options(conn: &mut PgConnection) -> DbResult<AssignmentOptions> {
    let projects = Projects::new(&mut *conn).list(&ProjectFilter::default()).await?;

    let mut catalogs = Catalogs::new(conn);
    let personnel = catalogs.active_personnel().await?;
    let roles = catalogs.reference(ReferenceTable::Roles).await?;

    Ok(AssignmentOptions {
        projects: Catalog::new("Project", projects),
        personnel: Catalog::new("Personnel", personnel),
        roles: Catalog::reference(ReferenceTable::Roles, roles),
    })
}

async fn load_role_catalog(conn: &mut PgConnection) -> DbResult<Catalog<ProjectRoleDetail>> {
    let roles = Catalogs::new(conn).project_roles().await?;
    Ok(Catalog::new("Project role", roles))
}

fn assignment_form(options: &AssignmentOptions) -> FormSpec {
    FormSpec::new(
        "assign_roles_form",
        Tab::AssignProjectRoles.title(),
        "Assign Role",
        vec![
            FormField::select("project", "Select Project", options.projects.options()),
            FormField::select("personnel", "Select Personnel", options.personnel.options()),
            FormField::select("role", "Select Role", options.roles.options()),
            NumberBounds::EPOCH_NUMBER.field("epoch_number"),
            NumberBounds::EPOCH_PERCENTAGE.field("epoch_percentage"),
        ],
    )
}

/// Update options are the mapping ids, as text.
fn update_form(roles: &[ProjectRoleDetail]) -> FormSpec {
    let ids = roles.iter().map(|r| r.project_role_mapping_id.to_string()).collect();

    FormSpec::new(
        "update_roles_form",
        Tab::UpdateProjectRoles.title(),
        "Update Role",
        vec![
            FormField::select("project_role_mapping_id", "Select Role to Update", ids),
            NumberBounds::EPOCH_NUMBER.field_labelled("epoch_number", "New Epoch Number"),
            NumberBounds::EPOCH_PERCENTAGE.field_labelled("epoch_percentage", "New Epoch Percentage"),
        ],
    )
}

fn role_deletion_form(roles: &Catalog<ProjectRoleDetail>) -> FormSpec {
    FormSpec::new(
        "delete_project_role_form",
        DeletionTab::DeleteProjectRole.title(),
        "Confirm Delete Role",
        vec![FormField::select("project_role", "Select Role to Delete", roles.options())],
    )
}

fn parse_mapping_id(raw: &str) -> Result<ProjectRoleMappingId> {
    raw.trim()
        .parse()
        .map_err(|_| Error::bad_request(format!("Invalid project role mapping id '{raw}'")))
}

/// Get the Assign Project Roles form
#[utoipa::path(
    get,
    path = "/project-management/assign-roles",
    tag = "project-management",
    summary = "Assign role form",
    responses(
        (status = 200, description = "Form with non-template projects, active personnel and roles", body = FormSpec),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn assign_roles_form(State(state): State<AppState>) -> Result<Json<FormSpec>> {
    let options = state
        .gateway
        .query(|conn| Box::pin(load_assignment_options(conn)))
        .await
        .map_err(Error::query("assignment options"))?;

    Ok(Json(assignment_form(&options)))
}

/// Assign a role on a project to a consultant
#[utoipa::path(
    post,
    path = "/project-management/assign-roles",
    tag = "project-management",
    summary = "Assign role",
    request_body = RoleAssignmentCreate,
    responses(
        (status = 201, description = "Role assigned", body = FormOutcome),
        (status = 400, description = "Epoch number or percentage out of range", body = crate::errors::ErrorBody),
        (status = 404, description = "Selected project, personnel or role no longer exists", body = crate::errors::ErrorBody),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn assign_role(State(state): State<AppState>, Json(create): Json<RoleAssignmentCreate>) -> Result<(StatusCode, Json<FormOutcome>)> {
    let epoch_number = NumberBounds::EPOCH_NUMBER.check_int(create.epoch_number)?;
    let epoch_percentage = NumberBounds::EPOCH_PERCENTAGE.check(create.epoch_percentage)?;

    let options = state
        .gateway
        .query(|conn| Box::pin(load_assignment_options(conn)))
        .await
        .map_err(Error::query("assignment options"))?;

    let project_id = options.projects.resolve(&create.project)?;
    let personnel_id = options.personnel.resolve(&create.personnel)?;
    let role_id = options.roles.resolve(&create.role)?;

    let request = ProjectRoleCreateDBRequest::new(project_id, role_id, personnel_id, epoch_number, epoch_percentage);
    let mapping = state
        .gateway
        .execute(move |conn| Box::pin(async move { ProjectRoles::new(conn).create(&request).await }))
        .await
        .map_err(Error::execution("assigning role"))?;

    tracing::info!(project_role_mapping_id = mapping.project_role_mapping_id, "Assigned role");
    Ok((
        StatusCode::CREATED,
        Json(FormOutcome::created("Role assigned successfully!", mapping.project_role_mapping_id)),
    ))
}

/// Get the Update Project Roles form and the current assignments
#[utoipa::path(
    get,
    path = "/project-management/update-roles",
    tag = "project-management",
    summary = "Update role form",
    responses(
        (status = 200, description = "Form plus every assignment with project, role and consultant names", body = ProjectRolesForm),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_roles_form(State(state): State<AppState>) -> Result<Json<ProjectRolesForm>> {
    let roles = state
        .gateway
        .query(|conn| Box::pin(load_role_catalog(conn)))
        .await
        .map_err(Error::query("project roles"))?
        .into_entries();

    Ok(Json(ProjectRolesForm {
        form: update_form(&roles),
        roles,
    }))
}

/// Change the epoch number and percentage of an assignment
#[utoipa::path(
    post,
    path = "/project-management/update-roles",
    tag = "project-management",
    summary = "Update role",
    request_body = RoleUpdate,
    responses(
        (status = 200, description = "Role updated", body = FormOutcome),
        (status = 400, description = "Malformed id, or epoch number or percentage out of range", body = crate::errors::ErrorBody),
        (status = 404, description = "No assignment with this id", body = crate::errors::ErrorBody),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all, fields(project_role_mapping_id = %update.project_role_mapping_id))]
pub async fn update_role(State(state): State<AppState>, Json(update): Json<RoleUpdate>) -> Result<Json<FormOutcome>> {
    let id = parse_mapping_id(&update.project_role_mapping_id)?;
    let request = ProjectRoleUpdateDBRequest {
        epoch_number: NumberBounds::EPOCH_NUMBER.check_int(update.epoch_number)?,
        epoch_percentage: NumberBounds::EPOCH_PERCENTAGE.check(update.epoch_percentage)?,
    };

    state
        .gateway
        .execute(move |conn| Box::pin(async move { ProjectRoles::new(conn).update(id, &request).await }))
        .await
        .map_err(Error::execution("updating role"))?;

    Ok(Json(FormOutcome::message("Role updated successfully!")))
}

/// Get the Delete Project Role form and the current assignments
#[utoipa::path(
    get,
    path = "/project-management/deletion/project-role",
    tag = "deletion",
    summary = "Delete role form",
    responses(
        (status = 200, description = "Form plus every assignment with project, role and consultant names", body = ProjectRolesForm),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_role_form(State(state): State<AppState>) -> Result<Json<ProjectRolesForm>> {
    let roles = state
        .gateway
        .query(|conn| Box::pin(load_role_catalog(conn)))
        .await
        .map_err(Error::query("project roles"))?;

    Ok(Json(ProjectRolesForm {
        form: role_deletion_form(&roles),
        roles: roles.into_entries(),
    }))
}

/// Delete one assignment, selected by its display string
#[utoipa::path(
    post,
    path = "/project-management/deletion/project-role",
    tag = "deletion",
    summary = "Delete role",
    request_body = RoleDelete,
    responses(
        (status = 200, description = "Role deleted", body = FormOutcome),
        (status = 404, description = "No assignment with this description", body = crate::errors::ErrorBody),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all, fields(project_role = %delete.project_role))]
pub async fn delete_role(State(state): State<AppState>, Json(delete): Json<RoleDelete>) -> Result<Json<FormOutcome>> {
    let roles = state
        .gateway
        .query(|conn| Box::pin(load_role_catalog(conn)))
        .await
        .map_err(Error::query("project roles"))?;
    let id = roles.resolve(&delete.project_role)?;

    let deleted = state
        .gateway
        .execute(move |conn| Box::pin(async move { ProjectRoles::new(conn).delete(id).await }))
        .await
        .map_err(Error::execution("deleting project role"))?;

    if !deleted {
        // Removed between the catalog fetch and the delete
        return Err(Error::execution("deleting project role")(DbError::NotFound));
    }

    Ok(Json(FormOutcome::message("Project role deleted successfully!")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::forms::FieldKind;

    fn detail(id: ProjectRoleMappingId) -> ProjectRoleDetail {
        ProjectRoleDetail {
            project_role_mapping_id: id,
            project_name: "Acme-2025".to_string(),
            role_name: "Developer".to_string(),
            full_name: "Grace Hopper".to_string(),
            epoch_number: 1,
            epoch_percentage: 50.0,
        }
    }

    #[test]
    fn update_form_offers_ids_as_text() {
        let form = update_form(&[detail(7), detail(12)]);
        assert_eq!(form.submit_label, "Update Role");
        match &form.field("project_role_mapping_id").unwrap().kind {
            FieldKind::Select { options } => assert_eq!(options, &vec!["7".to_string(), "12".to_string()]),
            other => panic!("expected select, got {other:?}"),
        }
        assert_eq!(form.field("epoch_number").unwrap().label, "New Epoch Number");
        assert_eq!(form.field("epoch_percentage").unwrap().label, "New Epoch Percentage");
    }

    #[test]
    fn delete_form_offers_display_strings() {
        let form = role_deletion_form(&Catalog::new("Project role", vec![detail(7)]));
        assert_eq!(form.title, "Delete Project Role");
        match &form.field("project_role").unwrap().kind {
            FieldKind::Select { options } => {
                assert_eq!(options, &vec!["Acme-2025 - Developer (Grace Hopper)".to_string()])
            }
            other => panic!("expected select, got {other:?}"),
        }
    }

    #[test]
    fn mapping_ids_must_be_integers() {
        assert_eq!(parse_mapping_id("17").unwrap(), 17);
        assert_eq!(parse_mapping_id(" 17 ").unwrap(), 17);

        let err = parse_mapping_id("seventeen").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid project role mapping id 'seventeen'");
    }

    #[cfg(feature = "db-tests")]
    mod db {
        use crate::api::models::outcome::FormOutcome;
        use crate::api::models::project_roles::ProjectRolesForm;
        use crate::db::models::project_roles::ProjectRoleDBResponse;
        use crate::errors::ErrorBody;
        use crate::test_utils::{create_test_app, seed_reference_data};
        use axum::http::StatusCode;
        use serde_json::json;
        use sqlx::PgPool;

        async fn mapping(pool: &PgPool, id: i64) -> Option<ProjectRoleDBResponse> {
            sqlx::query_as::<_, ProjectRoleDBResponse>(
                "SELECT project_role_mapping_id, project_id, role_id, personnel_id, epoch_number, epoch_value, epoch_percentage FROM projects_detail WHERE project_role_mapping_id = $1",
            )
            .bind(id)
            .fetch_optional(pool)
            .await
            .unwrap()
        }

        #[sqlx::test]
        #[test_log::test]
        async fn test_assign_role_twice_creates_two_rows(pool: PgPool) {
            let seed = seed_reference_data(&pool).await;
            let project_id = seed.insert_project(&pool, "Acme-2025").await;
            let server = create_test_app(&pool);

            let body = json!({
                "project": "Acme-2025",
                "personnel": "Ada Lovelace",
                "role": "Engagement Lead",
                "epoch_number": 2,
                "epoch_percentage": 50
            });

            let first = server.post("/api/v1/project-management/assign-roles").json(&body).await;
            first.assert_status(StatusCode::CREATED);
            let outcome: FormOutcome = first.json();
            assert_eq!(outcome.message, "Role assigned successfully!");

            let row = mapping(&pool, outcome.id.unwrap()).await.unwrap();
            assert_eq!(row.project_id, project_id);
            assert_eq!(row.personnel_id, seed.personnel[0]);
            assert_eq!(row.epoch_number, 2);
            assert_eq!(row.epoch_value, 1);
            assert_eq!(row.epoch_percentage, 50.0);

            server
                .post("/api/v1/project-management/assign-roles")
                .json(&body)
                .await
                .assert_status(StatusCode::CREATED);
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects_detail").fetch_one(&pool).await.unwrap();
            assert_eq!(count, 2);
        }

        #[sqlx::test]
        #[test_log::test]
        async fn test_assign_role_rejects_inactive_personnel(pool: PgPool) {
            let seed = seed_reference_data(&pool).await;
            seed.insert_project(&pool, "Acme-2025").await;
            let server = create_test_app(&pool);

            let response = server
                .post("/api/v1/project-management/assign-roles")
                .json(&json!({
                    "project": "Acme-2025",
                    "personnel": "Alan Turing",
                    "role": "Developer"
                }))
                .await;

            response.assert_status_not_found();
            let body: ErrorBody = response.json();
            assert_eq!(body.message, "Personnel 'Alan Turing' not found");
        }

        #[sqlx::test]
        #[test_log::test]
        async fn test_update_role_changes_epoch_only(pool: PgPool) {
            let seed = seed_reference_data(&pool).await;
            let project_id = seed.insert_project(&pool, "Acme-2025").await;
            let mapping_id = seed.insert_mapping(&pool, project_id, seed.personnel[1], 1, 100.0).await;
            let server = create_test_app(&pool);

            let form: ProjectRolesForm = server.get("/api/v1/project-management/update-roles").await.json();
            assert_eq!(form.roles.len(), 1);
            assert_eq!(form.roles[0].project_role_mapping_id, mapping_id);

            let response = server
                .post("/api/v1/project-management/update-roles")
                .json(&json!({
                    "project_role_mapping_id": mapping_id.to_string(),
                    "epoch_number": 3,
                    "epoch_percentage": 25
                }))
                .await;
            response.assert_status_ok();
            let outcome: FormOutcome = response.json();
            assert_eq!(outcome.message, "Role updated successfully!");

            let row = mapping(&pool, mapping_id).await.unwrap();
            assert_eq!(row.epoch_number, 3);
            assert_eq!(row.epoch_percentage, 25.0);
            assert_eq!(row.personnel_id, seed.personnel[1]);
        }

        #[sqlx::test]
        #[test_log::test]
        async fn test_update_unknown_role_is_not_found(pool: PgPool) {
            seed_reference_data(&pool).await;
            let server = create_test_app(&pool);

            let response = server
                .post("/api/v1/project-management/update-roles")
                .json(&json!({ "project_role_mapping_id": "999999", "epoch_number": 1, "epoch_percentage": 10 }))
                .await;
            response.assert_status_not_found();
        }

        #[sqlx::test]
        #[test_log::test]
        async fn test_delete_role_by_display_string(pool: PgPool) {
            let seed = seed_reference_data(&pool).await;
            let project_id = seed.insert_project(&pool, "Acme-2025").await;
            let kept = seed.insert_mapping(&pool, project_id, seed.personnel[0], 1, 100.0).await;
            let removed = seed.insert_mapping(&pool, project_id, seed.personnel[1], 1, 100.0).await;
            let server = create_test_app(&pool);

            let form: ProjectRolesForm = server.get("/api/v1/project-management/deletion/project-role").await.json();
            assert_eq!(form.roles.len(), 2);

            let response = server
                .post("/api/v1/project-management/deletion/project-role")
                .json(&json!({ "project_role": "Acme-2025 - Engagement Lead (Grace Hopper)" }))
                .await;
            response.assert_status_ok();
            let outcome: FormOutcome = response.json();
            assert_eq!(outcome.message, "Project role deleted successfully!");

            assert!(mapping(&pool, removed).await.is_none());
            assert!(mapping(&pool, kept).await.is_some());
        }
    }
}
