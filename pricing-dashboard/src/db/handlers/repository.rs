//! Base repository trait for database operations.

use crate::db::errors::Result;

/// Base repository trait providing common database operations
///
/// A repository is the data access layer for one table. It is built over a borrowed
/// connection, so the caller decides whether it runs inside a transaction
/// ([`crate::db::gateway::Gateway::execute`]) or not ([`crate::db::gateway::Gateway::query`]).
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating entities
    type CreateRequest;

    /// The response/DTO type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// The filter type for list operations
    type Filter: Send + Sync;

    /// Create a new entity
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Get an entity by ID
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>>;

    /// List entities matching the filter
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>>;

    /// Delete an entity by ID, returning whether a row was removed
    async fn delete(&mut self, id: Self::Id) -> Result<bool>;
}
