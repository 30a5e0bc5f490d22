//! # medidir-core
//!
//! Core library for browsing a healthcare directory of doctors, hospitals
//! and medical institutes over its REST API.
//!
//! This crate holds everything the `medidir` binary renders: the typed
//! client, per-resource fetchers, and the controllers that own list and
//! detail view state.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use medidir_core::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> medidir_core::Result<()> {
//!     let config = Config::load(None)?;
//!     let tokens = Arc::new(KeyringTokenStore::new(config.profile_name(None)));
//!     let client = Arc::new(DirectoryClient::new(config.api_url(None), tokens)?);
//!
//!     let mut doctors = ListController::new(
//!         "doctors",
//!         Arc::new(DoctorService::new(client)),
//!         config.page_size(None),
//!     );
//!     doctors
//!         .submit_filters(DoctorFilters {
//!             name: Some("Sarah".to_string()),
//!             ..Default::default()
//!         })
//!         .await;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           API Layer                 │  HTTP client, query builder, fetchers, models
//! ├─────────────────────────────────────┤
//! │          Core Layer                 │  Services, list/detail controllers, auth context
//! ├─────────────────────────────────────┤
//! │        Storage Layer                │  Configuration, token persistence
//! ├─────────────────────────────────────┤
//! │         Utils Layer                 │  Validation, error mapping, text helpers
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`]: Directory HTTP client, query strings and data models
//! - [`core`]: Services, view controllers and the auth context
//! - [`storage`]: Configuration and token management
//! - [`utils`]: Shared utilities
//! - [`display`]: Table rendering
//! - [`error`]: Hierarchical error system with troubleshooting hints

pub use error::AppError;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use medidir_core::prelude::*;
/// ```
pub mod prelude {
    // Error handling
    pub use crate::Result;
    pub use crate::error::AppError;

    // API client, filters and models
    pub use crate::api::client::DirectoryClient;
    pub use crate::api::filters::{DoctorFilters, Filters, HospitalFilters, InstitutionFilters};
    pub use crate::api::models::{Doctor, Hospital, Institution, MedicalTest, Page, User};

    // Services and controllers
    pub use crate::core::auth::AuthContext;
    pub use crate::core::controllers::{
        DoctorDetailController, FetchOutcome, HospitalDetailController, HospitalTab,
        InstituteDetailController, InstituteTab, ListController,
    };
    pub use crate::core::services::doctor_service::DoctorService;
    pub use crate::core::services::hospital_service::{HospitalDoctors, HospitalService, HospitalTests};
    pub use crate::core::services::institution_service::{
        InstituteAlumni, InstituteFaculty, InstitutionService,
    };
    pub use crate::core::services::reference_service::ReferenceService;

    // Storage
    pub use crate::storage::config::Config;
    pub use crate::storage::token::{KeyringTokenStore, MemoryTokenStore, TokenProvider};

    // Display utilities
    pub use crate::display::TableDisplay;
}

/// Business logic layer.
///
/// - [`core::services`]: Resource services over the client
/// - [`core::controllers`]: List and detail view state
/// - [`core::auth`]: Session state machine
pub mod core;

/// Storage layer - configuration and token persistence.
pub mod storage;

/// Utilities layer - shared helpers and common functionality.
pub mod utils;

/// API layer - directory HTTP client and data models.
///
/// - [`api::client`]: HTTP client with bearer authentication
/// - [`api::endpoints`]: One fetcher per backend resource
/// - [`api::query`]: Ordered query-string builder
/// - [`api::models`]: Request/response data structures
pub mod api;

/// Display layer - terminal tables.
pub mod display;

/// Error handling - hierarchical error system.
///
/// - Domain-specific error variants (API, Auth, Config, etc.)
/// - Severity levels
/// - Troubleshooting hints for common issues
pub mod error;

/// Convenient Result type alias using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
