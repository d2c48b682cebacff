//! Aggregate queries behind the read-only overview pages.

use crate::db::{
    errors::Result,
    models::pages::{ConsultantLevelRow, CurrencyAnalysisRow, ProjectOverviewRow},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Pages<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Pages<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), err)]
    pub async fn project_overview(&mut self) -> Result<Vec<ProjectOverviewRow>> {
        let rows = sqlx::query_as::<_, ProjectOverviewRow>(
            r#"
            SELECT p.project_id,
                   p.project_name,
                   c.currency_name,
                   s.status_name,
                   e.epoch_name,
                   p.number_epochs,
                   p.rate_variance,
                   CASE WHEN p.is_template THEN 'Template' ELSE 'Active Project' END AS project_type
            FROM projects p
            JOIN currency c ON p.currency_id = c.currency_id
            JOIN status s ON p.status_id = s.status_id
            JOIN epoch_type e ON p.epoch_id = e.epoch_id
            ORDER BY p.project_id
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rows)
    }

    /// Consultant levels with the number of active consultants at each.
    #[instrument(skip(self), err)]
    pub async fn consultant_rates(&mut self) -> Result<Vec<ConsultantLevelRow>> {
        let rows = sqlx::query_as::<_, ConsultantLevelRow>(
            r#"
            SELECT cl.consultant_level_id,
                   cl.level_name,
                   COUNT(p.personnel_id) FILTER (WHERE p.is_active) AS active_consultants
            FROM consultant_level cl
            LEFT JOIN personnel p ON p.consultant_level_id = cl.consultant_level_id
            GROUP BY cl.consultant_level_id, cl.level_name
            ORDER BY cl.consultant_level_id
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rows)
    }

    #[instrument(skip(self), err)]
    pub async fn currency_analysis(&mut self) -> Result<Vec<CurrencyAnalysisRow>> {
        let rows = sqlx::query_as::<_, CurrencyAnalysisRow>(
            r#"
            SELECT c.currency_name,
                   COUNT(p.project_id) AS project_count,
                   AVG(p.rate_variance) AS average_rate_variance
            FROM currency c
            LEFT JOIN projects p ON p.currency_id = c.currency_id
            GROUP BY c.currency_id, c.currency_name
            ORDER BY c.currency_id
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rows)
    }
}
