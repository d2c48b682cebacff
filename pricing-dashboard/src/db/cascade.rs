//! Declared deletion plans for entities with foreign-key dependents.
//!
//! The schema carries no `ON DELETE CASCADE`. Removing a project or a person means deleting
//! from each dependent table first, in the order the plan lists them, and the parent row
//! last, all inside the caller's transaction.
//!
//! A plan with dependents is gated: unless the caller has acknowledged the cascade, the
//! dependents are only counted and nothing is removed.

use crate::db::errors::{DbError, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use tracing::{debug, instrument};
use utoipa::ToSchema;

/// A table holding rows that reference the parent through `column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependent {
    pub table: &'static str,
    pub column: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct DeletionPlan {
    /// Human readable entity name, used in logs
    pub entity: &'static str,
    pub table: &'static str,
    pub key_column: &'static str,
    /// Removed in this order before the parent row
    pub dependents: &'static [Dependent],
}

pub const PROJECT_DELETION: DeletionPlan = DeletionPlan {
    entity: "project",
    table: "projects",
    key_column: "project_id",
    dependents: &[
        Dependent {
            table: "projects_detail",
            column: "project_id",
        },
        Dependent {
            table: "project_access",
            column: "project_id",
        },
        Dependent {
            table: "project_history",
            column: "project_id",
        },
    ],
};

pub const PERSONNEL_DELETION: DeletionPlan = DeletionPlan {
    entity: "personnel",
    table: "personnel",
    key_column: "personnel_id",
    dependents: &[
        Dependent {
            table: "projects_detail",
            column: "personnel_id",
        },
        Dependent {
            table: "project_access",
            column: "personnel_id",
        },
    ],
};

impl DeletionPlan {
    fn count_statement(dependent: &Dependent) -> String {
        format!("SELECT COUNT(*) FROM {} WHERE {} = $1", dependent.table, dependent.column)
    }

    fn delete_dependent_statement(dependent: &Dependent) -> String {
        format!("DELETE FROM {} WHERE {} = $1", dependent.table, dependent.column)
    }

    fn delete_parent_statement(&self) -> String {
        format!("DELETE FROM {} WHERE {} = $1", self.table, self.key_column)
    }
}

/// Number of referencing rows per dependent table, in plan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DependentCounts {
    pub tables: Vec<TableCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TableCount {
    pub table: String,
    pub rows: i64,
}

impl DependentCounts {
    pub fn total(&self) -> i64 {
        self.tables.iter().map(|t| t.rows).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn rows_in(&self, table: &str) -> i64 {
        self.tables.iter().find(|t| t.table == table).map(|t| t.rows).unwrap_or(0)
    }
}

/// What a committed cascade removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletionReport {
    /// Rows removed from each dependent table, in plan order
    pub dependents: DependentCounts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeOutcome {
    Deleted(DeletionReport),
    /// Dependents exist and the cascade was not acknowledged. Nothing was changed.
    PendingAcknowledgment(DependentCounts),
}

pub struct Cascade<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Cascade<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, plan), fields(entity = plan.entity), err)]
    pub async fn count_dependents(&mut self, plan: &DeletionPlan, id: i64) -> Result<DependentCounts> {
        let mut tables = Vec::with_capacity(plan.dependents.len());
        for dependent in plan.dependents {
            let rows: i64 = sqlx::query_scalar(&DeletionPlan::count_statement(dependent))
                .bind(id)
                .fetch_one(&mut *self.db)
                .await?;
            tables.push(TableCount {
                table: dependent.table.to_string(),
                rows,
            });
        }
        Ok(DependentCounts { tables })
    }

    /// Walk `plan` for the row keyed by `id`.
    ///
    /// Returns [`DbError::NotFound`] when the parent row does not exist.
    #[instrument(skip(self, plan), fields(entity = plan.entity), err)]
    pub async fn delete(&mut self, plan: &DeletionPlan, id: i64, acknowledged: bool) -> Result<CascadeOutcome> {
        let counts = self.count_dependents(plan, id).await?;

        if !counts.is_empty() && !acknowledged {
            debug!("{} {} has {} dependent rows, awaiting acknowledgment", plan.entity, id, counts.total());
            return Ok(CascadeOutcome::PendingAcknowledgment(counts));
        }

        let mut removed = Vec::with_capacity(plan.dependents.len());
        for dependent in plan.dependents {
            let result = sqlx::query(&DeletionPlan::delete_dependent_statement(dependent))
                .bind(id)
                .execute(&mut *self.db)
                .await?;
            removed.push(TableCount {
                table: dependent.table.to_string(),
                rows: result.rows_affected() as i64,
            });
        }

        let result = sqlx::query(&plan.delete_parent_statement())
            .bind(id)
            .execute(&mut *self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        Ok(CascadeOutcome::Deleted(DeletionReport {
            dependents: DependentCounts { tables: removed },
        }))
    }
}
