//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers, one module per dashboard area
//! - **[`models`]**: Request/response data structures, including form descriptions
//!
//! # API Structure
//!
//! Everything below is served under [`API_PREFIX`]:
//!
//! - **Menu** (`/menu`): Sidebar pages, tabs and their routes
//! - **Pages** (`/pages/*`): Read-only overviews
//! - **Project Management** (`/project-management/*`): One `GET` (form description) and one
//!   `POST` (submission) per form
//!
//! # OpenAPI Documentation
//!
//! Endpoints are annotated with `utoipa`; the document is served at `/api-docs/openapi.json`
//! and rendered at `/docs`.

pub mod handlers;
pub mod models;

/// Root of every dashboard endpoint
pub const API_PREFIX: &str = "/api/v1";
