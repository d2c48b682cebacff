//! Fixtures for database-backed tests.

use crate::{
    AppState, build_router,
    config::Config,
    db::gateway::Gateway,
    types::{PersonnelId, ProjectId, ProjectRoleMappingId, ReferenceId, RoleId},
};
use axum_test::TestServer;
use sqlx::PgPool;

/// Ids of the reference rows inserted by [`seed_reference_data`].
///
/// - templates: Standard, Fixed Fee
/// - currencies: USD, EUR
/// - epoch types: Quarterly, Monthly
/// - statuses: Active (id 1), Closed
/// - levels: Analyst, Manager
/// - roles: Engagement Lead, Developer
/// - personnel: Ada Lovelace (Manager, active), Grace Hopper (Analyst, active),
///   Alan Turing (Analyst, inactive, no email)
#[derive(Debug, Clone)]
pub struct SeedData {
    pub template_id: ReferenceId,
    pub currency_id: ReferenceId,
    pub epoch_id: ReferenceId,
    pub status_id: ReferenceId,
    pub levels: Vec<ReferenceId>,
    pub roles: Vec<RoleId>,
    pub personnel: Vec<PersonnelId>,
}

async fn insert_named(pool: &PgPool, table: &str, column: &str, id_column: &str, name: &str) -> ReferenceId {
    sqlx::query_scalar(&format!("INSERT INTO {table} ({column}) VALUES ($1) RETURNING {id_column}"))
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("Failed to seed {table}: {e}"))
}

async fn insert_person(pool: &PgPool, first: &str, last: &str, email: Option<&str>, level: ReferenceId, active: bool) -> PersonnelId {
    sqlx::query_scalar(
        r#"
        INSERT INTO personnel (first_name, last_name, email, ten_k_id, consultant_level_id, is_active)
        VALUES ($1, $2, $3, NULL, $4, $5)
        RETURNING personnel_id
        "#,
    )
    .bind(first)
    .bind(last)
    .bind(email)
    .bind(level)
    .bind(active)
    .fetch_one(pool)
    .await
    .expect("Failed to seed personnel")
}

pub async fn seed_reference_data(pool: &PgPool) -> SeedData {
    let template_id = insert_named(pool, "templates", "template_name", "template_id", "Standard").await;
    insert_named(pool, "templates", "template_name", "template_id", "Fixed Fee").await;

    let currency_id = insert_named(pool, "currency", "currency_name", "currency_id", "USD").await;
    insert_named(pool, "currency", "currency_name", "currency_id", "EUR").await;

    let epoch_id = insert_named(pool, "epoch_type", "epoch_name", "epoch_id", "Quarterly").await;
    insert_named(pool, "epoch_type", "epoch_name", "epoch_id", "Monthly").await;

    let status_id = insert_named(pool, "status", "status_name", "status_id", "Active").await;
    insert_named(pool, "status", "status_name", "status_id", "Closed").await;

    let analyst = insert_named(pool, "consultant_level", "level_name", "consultant_level_id", "Analyst").await;
    let manager = insert_named(pool, "consultant_level", "level_name", "consultant_level_id", "Manager").await;

    let lead = insert_named(pool, "roles", "role_name", "role_id", "Engagement Lead").await;
    let developer = insert_named(pool, "roles", "role_name", "role_id", "Developer").await;

    let personnel = vec![
        insert_person(pool, "Ada", "Lovelace", Some("ada@example.com"), manager, true).await,
        insert_person(pool, "Grace", "Hopper", Some("grace@example.com"), analyst, true).await,
        insert_person(pool, "Alan", "Turing", None, analyst, false).await,
    ];

    SeedData {
        template_id,
        currency_id,
        epoch_id,
        status_id,
        levels: vec![analyst, manager],
        roles: vec![lead, developer],
        personnel,
    }
}

impl SeedData {
    /// A non-template USD / Quarterly project with two epochs.
    pub async fn insert_project(&self, pool: &PgPool, name: &str) -> ProjectId {
        sqlx::query_scalar(
            r#"
            INSERT INTO projects (project_name, rate_variance, currency_id, status_id, is_template, epoch_id, number_epochs)
            VALUES ($1, 0.0, $2, $3, FALSE, $4, 2)
            RETURNING project_id
            "#,
        )
        .bind(name)
        .bind(self.currency_id)
        .bind(self.status_id)
        .bind(self.epoch_id)
        .fetch_one(pool)
        .await
        .expect("Failed to seed project")
    }

    /// Assign the Engagement Lead role.
    pub async fn insert_mapping(
        &self,
        pool: &PgPool,
        project_id: ProjectId,
        personnel_id: PersonnelId,
        epoch_number: i32,
        epoch_percentage: f64,
    ) -> ProjectRoleMappingId {
        sqlx::query_scalar(
            r#"
            INSERT INTO projects_detail (project_id, role_id, personnel_id, epoch_number, epoch_value, epoch_percentage)
            VALUES ($1, $2, $3, $4, 1, $5)
            RETURNING project_role_mapping_id
            "#,
        )
        .bind(project_id)
        .bind(self.roles[0])
        .bind(personnel_id)
        .bind(epoch_number)
        .bind(epoch_percentage)
        .fetch_one(pool)
        .await
        .expect("Failed to seed role mapping")
    }

    pub async fn insert_access(&self, pool: &PgPool, project_id: ProjectId, personnel_id: PersonnelId) {
        sqlx::query("INSERT INTO project_access (project_id, personnel_id) VALUES ($1, $2)")
            .bind(project_id)
            .bind(personnel_id)
            .execute(pool)
            .await
            .expect("Failed to seed project access");
    }

    pub async fn insert_history(&self, pool: &PgPool, project_id: ProjectId) {
        sqlx::query("INSERT INTO project_history (project_id, note) VALUES ($1, 'created')")
            .bind(project_id)
            .execute(pool)
            .await
            .expect("Failed to seed project history");
    }
}

/// A test server whose gateway connects to the database behind `pool`.
pub fn create_test_app(pool: &PgPool) -> TestServer {
    let state = AppState::builder()
        .gateway(Gateway::from_connect_options((*pool.connect_options()).clone()))
        .config(Config::default())
        .build();

    let router = build_router(state).expect("Failed to build router");
    TestServer::new(router).expect("Failed to create test server")
}
