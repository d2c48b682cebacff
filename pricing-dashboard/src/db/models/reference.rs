//! Database models for the read-only reference tables.

use crate::types::ReferenceId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A lookup table the dashboard reads but never writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceTable {
    Templates,
    Currencies,
    EpochTypes,
    Roles,
    ConsultantLevels,
    Statuses,
}

impl ReferenceTable {
    pub fn table(self) -> &'static str {
        match self {
            ReferenceTable::Templates => "templates",
            ReferenceTable::Currencies => "currency",
            ReferenceTable::EpochTypes => "epoch_type",
            ReferenceTable::Roles => "roles",
            ReferenceTable::ConsultantLevels => "consultant_level",
            ReferenceTable::Statuses => "status",
        }
    }

    pub fn id_column(self) -> &'static str {
        match self {
            ReferenceTable::Templates => "template_id",
            ReferenceTable::Currencies => "currency_id",
            ReferenceTable::EpochTypes => "epoch_id",
            ReferenceTable::Roles => "role_id",
            ReferenceTable::ConsultantLevels => "consultant_level_id",
            ReferenceTable::Statuses => "status_id",
        }
    }

    pub fn name_column(self) -> &'static str {
        match self {
            ReferenceTable::Templates => "template_name",
            ReferenceTable::Currencies => "currency_name",
            ReferenceTable::EpochTypes => "epoch_name",
            ReferenceTable::Roles => "role_name",
            ReferenceTable::ConsultantLevels => "level_name",
            ReferenceTable::Statuses => "status_name",
        }
    }

    /// Singular name used in "not found" messages
    pub fn resource(self) -> &'static str {
        match self {
            ReferenceTable::Templates => "Template",
            ReferenceTable::Currencies => "Currency",
            ReferenceTable::EpochTypes => "Epoch type",
            ReferenceTable::Roles => "Role",
            ReferenceTable::ConsultantLevels => "Consultant level",
            ReferenceTable::Statuses => "Status",
        }
    }

    pub(crate) fn select_statement(self) -> String {
        format!(
            "SELECT {id} AS id, {name} AS name FROM {table} ORDER BY {id}",
            id = self.id_column(),
            name = self.name_column(),
            table = self.table()
        )
    }
}

/// One `(key, display name)` row of a reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ReferenceItem {
    pub id: ReferenceId,
    pub name: String,
}
