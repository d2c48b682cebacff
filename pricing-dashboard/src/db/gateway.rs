//! Connection-per-operation access to the pricing store.
//!
//! The [`Gateway`] owns nothing but connection parameters. Every call to [`Gateway::query`]
//! or [`Gateway::execute`] opens a fresh connection, runs the operation and closes the
//! connection again, whatever the outcome. There is no pool and no retry.
//!
//! Operations are closures that receive the connection and return a boxed future, so a
//! repository can be built on top of it:
//!
//! ```ignore
//! let id = gateway
//!     .execute(move |conn| {
//!         Box::pin(async move {
//!             let mut projects = Projects::new(conn);
//!             projects.create(&request).await.map(|p| p.project_id)
//!         })
//!     })
//!     .await?;
//! ```

use crate::config::DatabaseConfig;
use crate::db::errors::{DbError, Result};
use futures::future::BoxFuture;
use sqlx::{
    Connection, PgConnection,
    migrate::Migrator,
    postgres::PgConnectOptions,
};
use std::time::Duration;
use tracing::{debug, instrument, warn};

#[derive(Clone, Debug)]
pub struct Gateway {
    /// Resolved connection options, or the reason they could not be built. Resolution
    /// failures are reported on first use so the service can start without credentials.
    target: std::result::Result<PgConnectOptions, String>,
    connect_timeout: Duration,
}

impl Gateway {
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            target: config.connect_options(),
            connect_timeout: config.connect_timeout,
        }
    }

    /// Build a gateway for already-resolved options (used by tests against a scratch database).
    pub fn from_connect_options(options: PgConnectOptions) -> Self {
        Self {
            target: Ok(options),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Whether connection parameters resolved. Says nothing about reachability.
    pub fn is_configured(&self) -> bool {
        self.target.is_ok()
    }

    async fn connect(&self) -> Result<PgConnection> {
        let options = self.target.as_ref().map_err(DbError::connection)?;

        match tokio::time::timeout(self.connect_timeout, PgConnection::connect_with(options)).await {
            Ok(Ok(conn)) => {
                debug!("Opened database connection");
                Ok(conn)
            }
            Ok(Err(e)) => Err(DbError::connection(e.to_string())),
            Err(_) => Err(DbError::connection(format!("timed out after {:?}", self.connect_timeout))),
        }
    }

    async fn close(conn: PgConnection) {
        if let Err(e) = conn.close().await {
            warn!("Failed to close database connection cleanly: {}", e);
        }
    }

    /// Run a read-only operation on a fresh connection.
    #[instrument(skip_all, err)]
    pub async fn query<T, F>(&self, op: F) -> Result<T>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T>> + Send,
    {
        let mut conn = self.connect().await?;
        let result = op(&mut conn).await;
        Self::close(conn).await;
        result
    }

    /// Run a write operation inside a transaction on a fresh connection.
    ///
    /// Commits when the operation succeeds, rolls back when it fails. A rollback failure is
    /// logged and the operation's own error is returned.
    #[instrument(skip_all, err)]
    pub async fn execute<T, F>(&self, op: F) -> Result<T>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T>> + Send,
    {
        let mut conn = self.connect().await?;
        let result = Self::in_transaction(&mut conn, op).await;
        Self::close(conn).await;
        result
    }

    async fn in_transaction<T, F>(conn: &mut PgConnection, op: F) -> Result<T>
    where
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T>>,
    {
        let mut tx = conn.begin().await?;

        match op(&mut *tx).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback failed after error '{}': {}", e, rollback_err);
                } else {
                    debug!("Rolled back transaction: {}", e);
                }
                Err(e)
            }
        }
    }

    /// Apply bundled migrations over a single connection.
    #[instrument(skip_all, err)]
    pub async fn run_migrations(&self, migrator: &Migrator) -> Result<()> {
        let mut conn = self.connect().await?;
        let result = migrator
            .run(&mut conn)
            .await
            .map_err(|e| DbError::Other(anyhow::Error::from(e)));
        Self::close(conn).await;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_gateway_fails_on_first_use() {
        let gateway = Gateway::new(&DatabaseConfig::default());
        assert!(!gateway.is_configured());

        let err = gateway
            .query(|_conn| Box::pin(async { Ok(()) }))
            .await
            .unwrap_err();

        match err {
            DbError::Connection { message } => assert!(message.contains("database.host")),
            other => panic!("expected connection error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_database_is_a_connection_error() {
        let options = PgConnectOptions::new_without_pgpass()
            .host("127.0.0.1")
            .port(1)
            .username("nobody")
            .database("nowhere");
        let gateway = Gateway::from_connect_options(options);

        let err = gateway
            .execute(|_conn| Box::pin(async { Ok(1_i64) }))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Connection { .. }));
    }

    #[cfg(feature = "db-tests")]
    mod db {
        use super::*;
        use sqlx::postgres::PgPoolOptions;

        async fn count_currencies(conn: &mut PgConnection) -> Result<i64> {
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM currency").fetch_one(conn).await?;
            Ok(count)
        }

        #[sqlx::test]
        async fn execute_commits_on_success(_pool: PgPoolOptions, connect_opts: PgConnectOptions) {
            let gateway = Gateway::from_connect_options(connect_opts);

            let id: i64 = gateway
                .execute(|conn| {
                    Box::pin(async move {
                        let id = sqlx::query_scalar::<_, i64>("INSERT INTO currency (currency_name) VALUES ('USD') RETURNING currency_id")
                            .fetch_one(conn)
                            .await?;
                        Ok(id)
                    })
                })
                .await
                .unwrap();

            assert!(id > 0);
            let count = gateway.query(|conn| Box::pin(count_currencies(conn))).await.unwrap();
            assert_eq!(count, 1);
        }

        #[sqlx::test]
        async fn execute_rolls_back_on_failure(_pool: PgPoolOptions, connect_opts: PgConnectOptions) {
            let gateway = Gateway::from_connect_options(connect_opts);

            let result: Result<()> = gateway
                .execute(|conn| {
                    Box::pin(async move {
                        sqlx::query("INSERT INTO currency (currency_name) VALUES ('EUR')")
                            .execute(&mut *conn)
                            .await?;
                        // projects.currency_id references a row that does not exist
                        sqlx::query(
                            "INSERT INTO projects (project_name, currency_id, status_id, epoch_id) VALUES ('Orphan', 999, 999, 999)",
                        )
                        .execute(&mut *conn)
                        .await?;
                        Ok(())
                    })
                })
                .await;

            assert!(matches!(result, Err(DbError::ForeignKeyViolation { .. })));
            let count = gateway.query(|conn| Box::pin(count_currencies(conn))).await.unwrap();
            assert_eq!(count, 0);
        }
    }
}
