//! The dashboard's navigation: sidebar pages, the Project Management tabs, and the single route
//! table they are served from.
//!
//! Every page registers its own router with the [`Shell`]. The sidebar [`Menu`] is derived from
//! what was registered, so the menu and the routes cannot drift apart. Project Management is
//! registered the same way as every other page; its tabs are routes inside its router.

use crate::AppState;
use axum::{Extension, Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;
use utoipa::ToSchema;

/// A sidebar page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Page {
    ProjectOverview,
    ConsultantRates,
    ProjectStaffing,
    CurrencyAnalysis,
    ProjectManagement,
}

impl Page {
    /// Sidebar order
    pub const ALL: [Page; 5] = [
        Page::ProjectOverview,
        Page::ConsultantRates,
        Page::ProjectStaffing,
        Page::CurrencyAnalysis,
        Page::ProjectManagement,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::ProjectOverview => "Project Overview",
            Page::ConsultantRates => "Consultant Rates",
            Page::ProjectStaffing => "Project Staffing",
            Page::CurrencyAnalysis => "Currency Analysis",
            Page::ProjectManagement => "Project Management",
        }
    }

    /// Path relative to the API root
    pub fn route(self) -> &'static str {
        match self {
            Page::ProjectOverview => "/pages/project-overview",
            Page::ConsultantRates => "/pages/consultant-rates",
            Page::ProjectStaffing => "/pages/project-staffing",
            Page::CurrencyAnalysis => "/pages/currency-analysis",
            Page::ProjectManagement => "/project-management",
        }
    }

    fn tabs(self) -> Vec<MenuTab> {
        match self {
            Page::ProjectManagement => Tab::ALL.iter().map(|tab| tab.menu_tab()).collect(),
            _ => Vec::new(),
        }
    }
}

/// A tab of the Project Management page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    CreateNewProject,
    AssignProjectRoles,
    UpdateProjectRoles,
    DeletionManagement,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::CreateNewProject,
        Tab::AssignProjectRoles,
        Tab::UpdateProjectRoles,
        Tab::DeletionManagement,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::CreateNewProject => "Create New Project",
            Tab::AssignProjectRoles => "Assign Project Roles",
            Tab::UpdateProjectRoles => "Update Project Roles",
            Tab::DeletionManagement => "Deletion Management",
        }
    }

    /// Path relative to the Project Management page. Deletion Management only groups its
    /// sections and has no form of its own.
    pub fn route(self) -> Option<&'static str> {
        match self {
            Tab::CreateNewProject => Some("/create-project"),
            Tab::AssignProjectRoles => Some("/assign-roles"),
            Tab::UpdateProjectRoles => Some("/update-roles"),
            Tab::DeletionManagement => None,
        }
    }

    fn menu_tab(self) -> MenuTab {
        let sections = match self {
            Tab::DeletionManagement => DeletionTab::ALL
                .iter()
                .map(|section| MenuSection {
                    title: section.title().to_string(),
                    route: page_route(Page::ProjectManagement, section.route()),
                })
                .collect(),
            _ => Vec::new(),
        };

        MenuTab {
            title: self.title().to_string(),
            route: self.route().map(|route| page_route(Page::ProjectManagement, route)),
            sections,
        }
    }
}

/// A section of the Deletion Management tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionTab {
    DeleteProject,
    DeleteProjectRole,
    DeletePersonnel,
}

impl DeletionTab {
    pub const ALL: [DeletionTab; 3] = [DeletionTab::DeleteProject, DeletionTab::DeleteProjectRole, DeletionTab::DeletePersonnel];

    pub fn title(self) -> &'static str {
        match self {
            DeletionTab::DeleteProject => "Delete Project",
            DeletionTab::DeleteProjectRole => "Delete Project Role",
            DeletionTab::DeletePersonnel => "Delete Personnel",
        }
    }

    /// Path relative to the Project Management page
    pub fn route(self) -> &'static str {
        match self {
            DeletionTab::DeleteProject => "/deletion/project",
            DeletionTab::DeleteProjectRole => "/deletion/project-role",
            DeletionTab::DeletePersonnel => "/deletion/personnel",
        }
    }
}

/// Informational assignments lookup shown before deleting a person, relative to the Project
/// Management page.
pub const PERSONNEL_ASSIGNMENTS_ROUTE: &str = "/deletion/personnel/assignments";

fn page_route(page: Page, route: &str) -> String {
    format!("{}{}{}", crate::api::API_PREFIX, page.route(), route)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Menu {
    pub title: String,
    pub entries: Vec<MenuEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuEntry {
    pub page: Page,
    pub title: String,
    /// Absolute path of the page's endpoint
    pub route: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tabs: Vec<MenuTab>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuTab {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<MenuSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuSection {
    pub title: String,
    pub route: String,
}

/// Route table for the dashboard pages.
pub struct Shell {
    title: String,
    pages: Vec<(Page, Router<AppState>)>,
}

impl Shell {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pages: Vec::new(),
        }
    }

    /// Register the router serving `page`. Paths inside `router` are relative to
    /// [`Page::route`]. A page registered twice keeps its first router.
    pub fn register(mut self, page: Page, router: Router<AppState>) -> Self {
        if self.pages.iter().any(|(registered, _)| *registered == page) {
            warn!("Page {:?} registered twice, keeping the first registration", page);
            return self;
        }
        self.pages.push((page, router));
        self
    }

    /// The sidebar, in [`Page::ALL`] order, listing registered pages only.
    pub fn menu(&self) -> Menu {
        let entries = Page::ALL
            .iter()
            .filter(|page| self.pages.iter().any(|(registered, _)| registered == *page))
            .map(|page| MenuEntry {
                page: *page,
                title: page.title().to_string(),
                route: format!("{}{}", crate::api::API_PREFIX, page.route()),
                tabs: page.tabs(),
            })
            .collect();

        Menu {
            title: self.title.clone(),
            entries,
        }
    }

    /// All registered pages plus `GET /menu`, relative to the API root.
    pub fn into_router(self) -> Router<AppState> {
        let menu = Arc::new(self.menu());

        self.pages
            .into_iter()
            .fold(Router::new(), |router, (page, page_router)| router.nest(page.route(), page_router))
            .route("/menu", get(get_menu).layer(Extension(menu)))
    }
}

/// Get the sidebar menu
#[utoipa::path(
    get,
    path = "/menu",
    tag = "menu",
    summary = "Get the sidebar menu",
    responses(
        (status = 200, description = "Pages, tabs and their routes", body = Menu),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_menu(Extension(menu): Extension<Arc<Menu>>) -> Json<Menu> {
    Json(menu.as_ref().clone())
}
