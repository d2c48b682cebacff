//! HTTP handlers for the Create New Project tab.

use crate::{
    AppState,
    api::models::{
        forms::{FormField, FormSpec, NumberBounds},
        outcome::FormOutcome,
        projects::ProjectCreate,
    },
    catalog::Catalog,
    db::{
        errors::Result as DbResult,
        handlers::{Catalogs, Projects, Repository},
        models::{
            projects::ProjectCreateDBRequest,
            reference::{ReferenceItem, ReferenceTable},
        },
    },
    errors::{Error, Result},
    shell::Tab,
};
use axum::{Json, extract::State, http::StatusCode};
use sqlx::PgConnection;

struct ProjectOptions {
    templates: Catalog<ReferenceItem>,
    currencies: Catalog<ReferenceItem>,
    epoch_types: Catalog<ReferenceItem>,
}

async fn load_project_options(conn: &mut PgConnection) -> DbResult<ProjectOptions> {
    let mut catalogs = Catalogs::new(conn);
    let templates = catalogs.reference(ReferenceTable::Templates).await?;
    let currencies = catalogs.reference(ReferenceTable::Currencies).await?;
    let epoch_types = catalogs.reference(ReferenceTable::EpochTypes).await?;

    Ok(ProjectOptions {
        templates: Catalog::reference(ReferenceTable::Templates, templates),
        currencies: Catalog::reference(ReferenceTable::Currencies, currencies),
        epoch_types: Catalog::reference(ReferenceTable::EpochTypes, epoch_types),
    })
}

fn project_form(options: &ProjectOptions) -> FormSpec {
    FormSpec::new(
        "new_project_form",
        Tab::CreateNewProject.title(),
        "Create Project",
        vec![
            FormField::text("project_name", "Project Name/Number"),
            FormField::select("template", "Select Project Template", options.templates.options()),
            FormField::select("currency", "Select Currency", options.currencies.options()),
            FormField::select("epoch_type", "Select Epoch Type", options.epoch_types.options()),
            NumberBounds::RATE_VARIANCE.field("rate_variance"),
            NumberBounds::NUMBER_OF_EPOCHS.field("number_epochs"),
        ],
    )
}

/// Get the Create New Project form
#[utoipa::path(
    get,
    path = "/project-management/create-project",
    tag = "project-management",
    summary = "Create project form",
    responses(
        (status = 200, description = "Form with template, currency and epoch type options", body = FormSpec),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_project_form(State(state): State<AppState>) -> Result<Json<FormSpec>> {
    let options = state
        .gateway
        .query(|conn| Box::pin(load_project_options(conn)))
        .await
        .map_err(Error::query("project options"))?;

    Ok(Json(project_form(&options)))
}

/// Create a project
#[utoipa::path(
    post,
    path = "/project-management/create-project",
    tag = "project-management",
    summary = "Create project",
    request_body = ProjectCreate,
    responses(
        (status = 201, description = "Project created", body = FormOutcome),
        (status = 400, description = "Value outside a field's bounds or rejected by the database", body = crate::errors::ErrorBody),
        (status = 404, description = "Selected template, currency or epoch type no longer exists", body = crate::errors::ErrorBody),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all, fields(project_name = %create.project_name))]
pub async fn create_project(State(state): State<AppState>, Json(create): Json<ProjectCreate>) -> Result<(StatusCode, Json<FormOutcome>)> {
    let rate_variance = NumberBounds::RATE_VARIANCE.check(create.rate_variance)?;
    let number_epochs = NumberBounds::NUMBER_OF_EPOCHS.check_int(create.number_epochs)?;

    let options = state
        .gateway
        .query(|conn| Box::pin(load_project_options(conn)))
        .await
        .map_err(Error::query("project options"))?;

    // The template must exist but is not stored on the project row
    options.templates.resolve(&create.template)?;
    let currency_id = options.currencies.resolve(&create.currency)?;
    let epoch_id = options.epoch_types.resolve(&create.epoch_type)?;

    let request = ProjectCreateDBRequest::new(create.project_name, rate_variance, currency_id, epoch_id, number_epochs);
    let project = state
        .gateway
        .execute(move |conn| Box::pin(async move { Projects::new(conn).create(&request).await }))
        .await
        .map_err(Error::execution("creating project"))?;

    tracing::info!(project_id = project.project_id, "Created project");
    Ok((
        StatusCode::CREATED,
        Json(FormOutcome::created(
            format!("Project created successfully! Project ID: {}", project.project_id),
            project.project_id,
        )),
    ))
}
