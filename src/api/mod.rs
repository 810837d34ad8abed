//! HTTP-agnostic API layer
//!
//! This module provides typed request/response structures and pure business logic
//! handlers that can be used by any HTTP server implementation (`tiny_http`, axum, etc.)
//! or directly by clients (CLI, mobile scanner app, etc.).
//!
//! ## Design
//!
//! - **Handlers are pure functions**: Take typed input, return `Result<T, ApiError>`
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation

mod context;
mod error;
mod handlers;
mod types;

pub use context::AppContext;
pub use error::{ApiError, ApiErrorData, ErrorCode};
pub use handlers::{
    DEFAULT_AUDIT_LIMIT, create_asset, create_inspection, delete_asset, get_asset, get_events,
    get_inspection, get_stats, get_summary, health, list_assets, list_audit, list_inspections,
};
pub use types::{
    ApiResponse, AssetAccessData, AssetDeleteData, AssetsData, AuditData, CreateAssetRequest,
    CreateInspectionRequest, EventsData, HealthData, InspectionCreateData, InspectionsData,
};
