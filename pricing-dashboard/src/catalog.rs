//! Selection lists and display-name resolution.
//!
//! Forms offer display values (a currency name, a consultant's full name, a role mapping's
//! composite description). On submission the chosen value is resolved back to its key by an
//! exact match within the list fetched for that submission. No fresh query is issued per
//! lookup, and when two rows share a display value the first one in catalog order wins.

use crate::db::models::{
    personnel::{AssignablePersonnel, PersonnelSummary},
    project_roles::ProjectRoleDetail,
    projects::{ProjectDBResponse, ProjectSummary},
    reference::{ReferenceItem, ReferenceTable},
};
use crate::errors::Error;
use crate::types::{PersonnelId, ProjectId, ProjectRoleMappingId, ReferenceId};
use std::borrow::Cow;

/// A row that can be offered in a selection list.
pub trait CatalogEntry {
    type Key: Copy;

    fn key(&self) -> Self::Key;

    fn display_name(&self) -> Cow<'_, str>;
}

#[derive(Debug, Clone)]
pub struct Catalog<T> {
    resource: &'static str,
    entries: Vec<T>,
}

impl<T: CatalogEntry> Catalog<T> {
    pub fn new(resource: &'static str, entries: Vec<T>) -> Self {
        Self { resource, entries }
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<T> {
        self.entries
    }

    /// Display values in catalog order, duplicates included.
    pub fn options(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.display_name().into_owned()).collect()
    }

    pub fn find(&self, display: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.display_name() == display)
    }

    /// Resolve a selected display value to its key.
    pub fn resolve(&self, display: &str) -> Result<T::Key, Error> {
        self.find(display).map(|e| e.key()).ok_or_else(|| Error::NotFound {
            resource: self.resource.to_string(),
            id: display.to_string(),
        })
    }
}

impl Catalog<ReferenceItem> {
    pub fn reference(table: ReferenceTable, entries: Vec<ReferenceItem>) -> Self {
        Self::new(table.resource(), entries)
    }
}

impl CatalogEntry for ReferenceItem {
    type Key = ReferenceId;

    fn key(&self) -> ReferenceId {
        self.id
    }

    fn display_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

impl CatalogEntry for ProjectDBResponse {
    type Key = ProjectId;

    fn key(&self) -> ProjectId {
        self.project_id
    }

    fn display_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.project_name)
    }
}

impl CatalogEntry for ProjectSummary {
    type Key = ProjectId;

    fn key(&self) -> ProjectId {
        self.project_id
    }

    fn display_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.project_name)
    }
}

impl CatalogEntry for AssignablePersonnel {
    type Key = PersonnelId;

    fn key(&self) -> PersonnelId {
        self.personnel_id
    }

    fn display_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.full_name)
    }
}

impl CatalogEntry for PersonnelSummary {
    type Key = PersonnelId;

    fn key(&self) -> PersonnelId {
        self.personnel_id
    }

    fn display_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.full_name)
    }
}

impl CatalogEntry for ProjectRoleDetail {
    type Key = ProjectRoleMappingId;

    fn key(&self) -> ProjectRoleMappingId {
        self.project_role_mapping_id
    }

    fn display_name(&self) -> Cow<'_, str> {
        Cow::Owned(self.display_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn currencies() -> Catalog<ReferenceItem> {
        Catalog::reference(
            ReferenceTable::Currencies,
            vec![
                ReferenceItem {
                    id: 1,
                    name: "USD".to_string(),
                },
                ReferenceItem {
                    id: 2,
                    name: "EUR".to_string(),
                },
                ReferenceItem {
                    id: 3,
                    name: "USD".to_string(),
                },
            ],
        )
    }

    #[test]
    fn options_keep_catalog_order_and_duplicates() {
        assert_eq!(currencies().options(), vec!["USD", "EUR", "USD"]);
    }

    #[test]
    fn resolve_is_exact_and_first_match_wins() {
        let catalog = currencies();
        assert_eq!(catalog.resolve("USD").unwrap(), 1);
        assert_eq!(catalog.resolve("EUR").unwrap(), 2);
        assert!(catalog.resolve("usd").is_err());
        assert!(catalog.resolve("EUR ").is_err());
    }

    #[test]
    fn missing_selection_is_not_found() {
        let err = currencies().resolve("GBP").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Currency 'GBP' not found");
    }

    #[test]
    fn role_mappings_resolve_by_composite_display() {
        let catalog = Catalog::new(
            "Project role",
            vec![ProjectRoleDetail {
                project_role_mapping_id: 42,
                project_name: "Acme-2025".to_string(),
                role_name: "Developer".to_string(),
                full_name: "Grace Hopper".to_string(),
                epoch_number: 1,
                epoch_percentage: 50.0,
            }],
        );

        assert_eq!(catalog.options(), vec!["Acme-2025 - Developer (Grace Hopper)"]);
        assert_eq!(catalog.resolve("Acme-2025 - Developer (Grace Hopper)").unwrap(), 42);
        assert!(catalog.resolve("Acme-2025").is_err());
    }

    #[test]
    fn empty_catalog_resolves_nothing() {
        let catalog: Catalog<PersonnelSummary> = Catalog::new("Personnel", Vec::new());
        assert!(catalog.options().is_empty());
        assert!(catalog.find("Ada Lovelace").is_none());
        assert!(catalog.resolve("Ada Lovelace").is_err());
    }
}
