//! Read-only dashboard pages.

use crate::{
    AppState,
    db::{
        handlers::{Catalogs, Pages},
        models::{
            pages::{ConsultantLevelRow, CurrencyAnalysisRow, ProjectOverviewRow},
            project_roles::ProjectRoleDetail,
        },
    },
    errors::{Error, Result},
};
use axum::{Json, extract::State};

/// Projects with their currency, status and epoch type
#[utoipa::path(
    get,
    path = "/pages/project-overview",
    tag = "pages",
    summary = "Project overview",
    responses(
        (status = 200, description = "Every project, templates included", body = [ProjectOverviewRow]),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn project_overview(State(state): State<AppState>) -> Result<Json<Vec<ProjectOverviewRow>>> {
    let rows = state
        .gateway
        .query(|conn| Box::pin(async move { Pages::new(conn).project_overview().await }))
        .await
        .map_err(Error::query("project overview"))?;

    Ok(Json(rows))
}

/// Consultant levels with their active headcount
#[utoipa::path(
    get,
    path = "/pages/consultant-rates",
    tag = "pages",
    summary = "Consultant rates",
    responses(
        (status = 200, description = "Every consultant level, including levels with nobody active", body = [ConsultantLevelRow]),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn consultant_rates(State(state): State<AppState>) -> Result<Json<Vec<ConsultantLevelRow>>> {
    let rows = state
        .gateway
        .query(|conn| Box::pin(async move { Pages::new(conn).consultant_rates().await }))
        .await
        .map_err(Error::query("consultant rates"))?;

    Ok(Json(rows))
}

/// Every role assignment with project, role and consultant names
#[utoipa::path(
    get,
    path = "/pages/project-staffing",
    tag = "pages",
    summary = "Project staffing",
    responses(
        (status = 200, description = "All role assignments", body = [ProjectRoleDetail]),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn project_staffing(State(state): State<AppState>) -> Result<Json<Vec<ProjectRoleDetail>>> {
    let rows = state
        .gateway
        .query(|conn| Box::pin(async move { Catalogs::new(conn).project_roles().await }))
        .await
        .map_err(Error::query("project staffing"))?;

    Ok(Json(rows))
}

/// Project count and mean rate variance per currency
#[utoipa::path(
    get,
    path = "/pages/currency-analysis",
    tag = "pages",
    summary = "Currency analysis",
    responses(
        (status = 200, description = "Every currency, including unused ones", body = [CurrencyAnalysisRow]),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn currency_analysis(State(state): State<AppState>) -> Result<Json<Vec<CurrencyAnalysisRow>>> {
    let rows = state
        .gateway
        .query(|conn| Box::pin(async move { Pages::new(conn).currency_analysis().await }))
        .await
        .map_err(Error::query("currency analysis"))?;

    Ok(Json(rows))
}
