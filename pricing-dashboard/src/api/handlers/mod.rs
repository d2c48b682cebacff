//! HTTP request handlers, grouped by dashboard page.
//!
//! [`shell`] registers every page router with the [`Shell`], which derives the sidebar menu
//! from those registrations.

pub mod deletion;
pub mod pages;
pub mod project_roles;
pub mod projects;

use crate::{
    AppState,
    shell::{DeletionTab, PERSONNEL_ASSIGNMENTS_ROUTE, Page, Shell, Tab},
};
use axum::{
    Router,
    routing::{MethodRouter, get},
};

fn page_router(handler: MethodRouter<AppState>) -> Router<AppState> {
    Router::new().route("/", handler)
}

fn tab_handler(tab: Tab) -> Option<MethodRouter<AppState>> {
    match tab {
        Tab::CreateNewProject => Some(get(projects::create_project_form).post(projects::create_project)),
        Tab::AssignProjectRoles => Some(get(project_roles::assign_roles_form).post(project_roles::assign_role)),
        Tab::UpdateProjectRoles => Some(get(project_roles::update_roles_form).post(project_roles::update_role)),
        Tab::DeletionManagement => None,
    }
}

fn deletion_handler(section: DeletionTab) -> MethodRouter<AppState> {
    match section {
        DeletionTab::DeleteProject => get(deletion::delete_project_form).post(deletion::delete_project),
        DeletionTab::DeleteProjectRole => get(project_roles::delete_role_form).post(project_roles::delete_role),
        DeletionTab::DeletePersonnel => get(deletion::delete_personnel_form).post(deletion::delete_personnel),
    }
}

/// Every tab and deletion section at the route the menu advertises for it.
pub fn project_management_router() -> Router<AppState> {
    let router = Tab::ALL.iter().fold(Router::new(), |router, tab| match (tab.route(), tab_handler(*tab)) {
        (Some(route), Some(handler)) => router.route(route, handler),
        _ => router,
    });

    DeletionTab::ALL
        .iter()
        .fold(router, |router, section| router.route(section.route(), deletion_handler(*section)))
        .route(PERSONNEL_ASSIGNMENTS_ROUTE, get(deletion::personnel_assignments))
}

/// The dashboard with all of its pages registered.
pub fn shell(title: &str) -> Shell {
    Shell::new(title)
        .register(Page::ProjectOverview, page_router(get(pages::project_overview)))
        .register(Page::ConsultantRates, page_router(get(pages::consultant_rates)))
        .register(Page::ProjectStaffing, page_router(get(pages::project_staffing)))
        .register(Page::CurrencyAnalysis, page_router(get(pages::currency_analysis)))
        .register(Page::ProjectManagement, project_management_router())
}
