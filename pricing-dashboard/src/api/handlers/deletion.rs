//! HTTP handlers for the Delete Project and Delete Personnel sections of Deletion Management.
//!
//! A delete with dependents runs in two submissions unless the request already carries the
//! acknowledgment: the first reports the dependent row counts and deletes nothing, the second
//! (acknowledged) deletes the dependents and then the parent in one transaction.

use crate::{
    AppState,
    api::models::{
        deletion::{
            DeletionOutcome, DeletionStatus, PERSONNEL_ASSIGNMENTS_WARNING, PERSONNEL_DEPENDENTS_WARNING, PROJECT_DEPENDENTS_WARNING,
            PersonnelAssignments, PersonnelAssignmentsQuery, PersonnelDelete, PersonnelDeletionForm, ProjectDelete, ProjectDeletionForm,
        },
        forms::{ACKNOWLEDGE_CASCADE_LABEL, FormField, FormSpec},
    },
    catalog::Catalog,
    db::{
        cascade::CascadeOutcome,
        errors::Result as DbResult,
        handlers::{Catalogs, Personnel, Projects},
        models::{personnel::PersonnelSummary, projects::ProjectSummary},
    },
    errors::{Error, Result},
    shell::DeletionTab,
};
use axum::{
    Json,
    extract::{Query, State},
};
use sqlx::PgConnection;

async fn load_project_catalog(conn: &mut PgConnection) -> DbResult<Catalog<ProjectSummary>> {
    let projects = Catalogs::new(conn).deletable_projects().await?;
    Ok(Catalog::new("Project", projects))
}

async fn load_personnel_catalog(conn: &mut PgConnection) -> DbResult<Catalog<PersonnelSummary>> {
    let personnel = Catalogs::new(conn).all_personnel().await?;
    Ok(Catalog::new("Personnel", personnel))
}

fn project_deletion_form(projects: &Catalog<ProjectSummary>) -> FormSpec {
    FormSpec::new(
        "delete_project_form",
        DeletionTab::DeleteProject.title(),
        "Confirm Delete Project",
        vec![
            FormField::select("project", "Choose Project", projects.options()),
            FormField::checkbox("acknowledge_cascade", ACKNOWLEDGE_CASCADE_LABEL),
        ],
    )
}

fn personnel_deletion_form(personnel: &Catalog<PersonnelSummary>) -> FormSpec {
    FormSpec::new(
        "delete_personnel_form",
        DeletionTab::DeletePersonnel.title(),
        "Confirm Delete Personnel",
        vec![
            FormField::select("personnel", "Select Personnel to Delete", personnel.options()),
            FormField::checkbox("acknowledge_cascade", ACKNOWLEDGE_CASCADE_LABEL),
        ],
    )
}

fn deletion_outcome(outcome: CascadeOutcome, deleted_message: String, warning: &str) -> DeletionOutcome {
    match outcome {
        CascadeOutcome::Deleted(report) => DeletionOutcome {
            status: DeletionStatus::Deleted,
            message: deleted_message,
            dependents: report.dependents,
        },
        CascadeOutcome::PendingAcknowledgment(counts) => DeletionOutcome {
            status: DeletionStatus::PendingAcknowledgment,
            message: warning.to_string(),
            dependents: counts,
        },
    }
}

/// Get the Delete Project form and the projects table
#[utoipa::path(
    get,
    path = "/project-management/deletion/project",
    tag = "deletion",
    summary = "Delete project form",
    responses(
        (status = 200, description = "Form plus every project with status and type", body = ProjectDeletionForm),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_project_form(State(state): State<AppState>) -> Result<Json<ProjectDeletionForm>> {
    let projects = state
        .gateway
        .query(|conn| Box::pin(load_project_catalog(conn)))
        .await
        .map_err(Error::query("projects"))?;

    Ok(Json(ProjectDeletionForm {
        form: project_deletion_form(&projects),
        projects: projects.into_entries(),
    }))
}

/// Delete a project, or report what would be deleted with it
#[utoipa::path(
    post,
    path = "/project-management/deletion/project",
    tag = "deletion",
    summary = "Delete project",
    request_body = ProjectDelete,
    responses(
        (status = 200, description = "Project deleted, or dependents found and acknowledgment required", body = DeletionOutcome),
        (status = 404, description = "No project with this name", body = crate::errors::ErrorBody),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all, fields(project = %delete.project, acknowledged = delete.acknowledge_cascade))]
pub async fn delete_project(State(state): State<AppState>, Json(delete): Json<ProjectDelete>) -> Result<Json<DeletionOutcome>> {
    let projects = state
        .gateway
        .query(|conn| Box::pin(load_project_catalog(conn)))
        .await
        .map_err(Error::query("projects"))?;
    let project_id = projects.resolve(&delete.project)?;

    let acknowledged = delete.acknowledge_cascade;
    let outcome = state
        .gateway
        .execute(move |conn| Box::pin(async move { Projects::new(conn).delete_with_dependents(project_id, acknowledged).await }))
        .await
        .map_err(Error::execution("deleting project"))?;

    let outcome = deletion_outcome(
        outcome,
        format!("Project {} deleted successfully!", delete.project),
        PROJECT_DEPENDENTS_WARNING,
    );
    tracing::info!(project_id, status = ?outcome.status, dependents = outcome.dependents.total(), "Project deletion");
    Ok(Json(outcome))
}

/// Get the Delete Personnel form and the personnel table
#[utoipa::path(
    get,
    path = "/project-management/deletion/personnel",
    tag = "deletion",
    summary = "Delete personnel form",
    responses(
        (status = 200, description = "Form plus every consultant with level and status", body = PersonnelDeletionForm),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_personnel_form(State(state): State<AppState>) -> Result<Json<PersonnelDeletionForm>> {
    let personnel = state
        .gateway
        .query(|conn| Box::pin(load_personnel_catalog(conn)))
        .await
        .map_err(Error::query("personnel"))?;

    Ok(Json(PersonnelDeletionForm {
        form: personnel_deletion_form(&personnel),
        personnel: personnel.into_entries(),
    }))
}

/// List the projects and roles a consultant is assigned to
#[utoipa::path(
    get,
    path = "/project-management/deletion/personnel/assignments",
    tag = "deletion",
    summary = "Personnel assignments",
    params(PersonnelAssignmentsQuery),
    responses(
        (status = 200, description = "Assignments of the selected consultant, with a warning when there are any", body = PersonnelAssignments),
        (status = 404, description = "No consultant with this name", body = crate::errors::ErrorBody),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all, fields(personnel = %query.personnel))]
pub async fn personnel_assignments(
    State(state): State<AppState>,
    Query(query): Query<PersonnelAssignmentsQuery>,
) -> Result<Json<PersonnelAssignments>> {
    let personnel = state
        .gateway
        .query(|conn| Box::pin(load_personnel_catalog(conn)))
        .await
        .map_err(Error::query("personnel"))?;
    let personnel_id = personnel.resolve(&query.personnel)?;

    let assignments = state
        .gateway
        .query(move |conn| Box::pin(async move { Catalogs::new(conn).personnel_assignments(personnel_id).await }))
        .await
        .map_err(Error::query("personnel assignments"))?;

    let warning = (!assignments.is_empty()).then(|| PERSONNEL_ASSIGNMENTS_WARNING.to_string());
    Ok(Json(PersonnelAssignments { warning, assignments }))
}

/// Delete a consultant, or report what would be deleted with them
#[utoipa::path(
    post,
    path = "/project-management/deletion/personnel",
    tag = "deletion",
    summary = "Delete personnel",
    request_body = PersonnelDelete,
    responses(
        (status = 200, description = "Personnel deleted, or dependents found and acknowledgment required", body = DeletionOutcome),
        (status = 404, description = "No consultant with this name", body = crate::errors::ErrorBody),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all, fields(personnel = %delete.personnel, acknowledged = delete.acknowledge_cascade))]
pub async fn delete_personnel(State(state): State<AppState>, Json(delete): Json<PersonnelDelete>) -> Result<Json<DeletionOutcome>> {
    let personnel = state
        .gateway
        .query(|conn| Box::pin(load_personnel_catalog(conn)))
        .await
        .map_err(Error::query("personnel"))?;
    let personnel_id = personnel.resolve(&delete.personnel)?;

    let acknowledged = delete.acknowledge_cascade;
    let outcome = state
        .gateway
        .execute(move |conn| Box::pin(async move { Personnel::new(conn).delete_with_dependents(personnel_id, acknowledged).await }))
        .await
        .map_err(Error::execution("deleting personnel"))?;

    let outcome = deletion_outcome(outcome, "Personnel deleted successfully!".to_string(), PERSONNEL_DEPENDENTS_WARNING);
    tracing::info!(personnel_id, status = ?outcome.status, dependents = outcome.dependents.total(), "Personnel deletion");
    Ok(Json(outcome))
}
