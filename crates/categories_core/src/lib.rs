//! Core data access for the categories resource.
//!
//! Validation, slug derivation and persistence for `categories(id, title,
//! slug)`, plus the SQLite bootstrap and logging setup they run on.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, seed_default_categories, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{
    default_categories, derive_slug, Category, CategoryId, CategoryToCreate,
    CategoryValidationError, TITLE_MAX_CHARS, TITLE_MIN_CHARS,
};
pub use model::validation::{validate_category, CategoryValidation, FieldIssue};
pub use repo::category_repo::{
    CategoryRepository, RepoError, RepoResult, SqliteCategoryRepository,
};
pub use repo::memory_repo::InMemoryCategoryRepository;
pub use service::category_service::{CategoryService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
