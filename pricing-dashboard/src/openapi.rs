//! OpenAPI documentation for the dashboard API at `/api/v1/*`.

use utoipa::OpenApi;

use crate::{api, db, errors, shell};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Consulting Pricing Model Dashboard API",
        description = "Projects, personnel and role assignments for the consulting pricing model."
    ),
    servers(
        (url = "/api/v1", description = "Dashboard API")
    ),
    paths(
        shell::get_menu,
        api::handlers::pages::project_overview,
        api::handlers::pages::consultant_rates,
        api::handlers::pages::project_staffing,
        api::handlers::pages::currency_analysis,
        api::handlers::projects::create_project_form,
        api::handlers::projects::create_project,
        api::handlers::project_roles::assign_roles_form,
        api::handlers::project_roles::assign_role,
        api::handlers::project_roles::update_roles_form,
        api::handlers::project_roles::update_role,
        api::handlers::project_roles::delete_role_form,
        api::handlers::project_roles::delete_role,
        api::handlers::deletion::delete_project_form,
        api::handlers::deletion::delete_project,
        api::handlers::deletion::delete_personnel_form,
        api::handlers::deletion::personnel_assignments,
        api::handlers::deletion::delete_personnel,
    ),
    components(
        schemas(
            shell::Menu,
            shell::MenuEntry,
            shell::MenuTab,
            shell::MenuSection,
            shell::Page,
            api::models::forms::FormSpec,
            api::models::forms::FormField,
            api::models::forms::FieldKind,
            api::models::outcome::FormOutcome,
            api::models::projects::ProjectCreate,
            api::models::project_roles::RoleAssignmentCreate,
            api::models::project_roles::RoleUpdate,
            api::models::project_roles::RoleDelete,
            api::models::project_roles::ProjectRolesForm,
            api::models::deletion::ProjectDelete,
            api::models::deletion::PersonnelDelete,
            api::models::deletion::DeletionStatus,
            api::models::deletion::DeletionOutcome,
            api::models::deletion::ProjectDeletionForm,
            api::models::deletion::PersonnelDeletionForm,
            api::models::deletion::PersonnelAssignments,
            db::cascade::DependentCounts,
            db::cascade::TableCount,
            db::models::pages::ProjectOverviewRow,
            db::models::pages::ConsultantLevelRow,
            db::models::pages::CurrencyAnalysisRow,
            db::models::project_roles::ProjectRoleDetail,
            db::models::projects::ProjectSummary,
            db::models::personnel::PersonnelSummary,
            db::models::personnel::PersonnelAssignment,
            errors::ErrorBody,
        )
    ),
    tags(
        (name = "menu", description = "Sidebar navigation derived from the registered pages."),
        (name = "pages", description = "Read-only dashboard pages."),
        (name = "project-management", description = "Create projects and assign or update role assignments.

Each tab is a `GET` returning the form (fields, select options, numeric bounds) and a `POST` taking the submission."),
        (name = "deletion", description = "Delete projects, role assignments and personnel.

Deleting a project or a consultant that other rows reference returns `pending_acknowledgment` with the dependent row counts and changes nothing. Resubmit with `acknowledge_cascade: true` to delete the dependents and the parent in one transaction."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_form_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        for path in [
            "/menu",
            "/pages/project-overview",
            "/project-management/create-project",
            "/project-management/update-roles",
            "/project-management/deletion/project-role",
            "/project-management/deletion/personnel/assignments",
        ] {
            assert!(paths.iter().any(|p| p == path), "missing {path}");
        }
        assert_eq!(doc.servers.unwrap()[0].url, "/api/v1");
    }
}
