//! Category use-case service.
//!
//! # Responsibility
//! - Provide list/get/validate/create/update/remove entry points.
//! - Turn untrusted JSON input into typed requests before any write.
//! - Emit one structured log event per operation.
//!
//! # Invariants
//! - Validation failures are returned as `ServiceError::Invalid`, never as
//!   store faults.
//! - Store faults are logged and returned unchanged; nothing is swallowed.
//! - Titles are not logged at info level; slugs are.

use crate::model::category::{Category, CategoryToCreate};
use crate::model::validation::{validate_category, CategoryValidation, FieldIssue};
use crate::repo::category_repo::{CategoryRepository, RepoError};
use log::{debug, error, info, trace, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for category use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Input failed the category schema check.
    Invalid(Vec<FieldIssue>),
    /// Target slug does not exist.
    NotFound(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(issues) => {
                write!(f, "invalid category input:")?;
                for issue in issues {
                    if issue.path.is_empty() {
                        write!(f, " {};", issue.message)?;
                    } else {
                        write!(f, " {}: {};", issue.path, issue.message)?;
                    }
                }
                Ok(())
            }
            Self::NotFound(slug) => write!(f, "category not found: {slug}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(slug) => Self::NotFound(slug),
            RepoError::Validation(err) => Self::Invalid(vec![err.into()]),
            other => Self::Repo(other),
        }
    }
}

/// Use-case wrapper over a `CategoryRepository`.
pub struct CategoryService<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    /// Creates a service over the provided repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every stored category.
    pub fn list_all(&self) -> ServiceResult<Vec<Category>> {
        let started_at = Instant::now();
        let categories = self
            .repo
            .list_categories()
            .map_err(|err| log_failure("category_list", "-", started_at, err))?;

        debug!(
            "event=category_list module=category status=ok count={} duration_ms={}",
            categories.len(),
            started_at.elapsed().as_millis()
        );
        trace!("event=category_list module=category rows={categories:?}");
        Ok(categories)
    }

    /// Looks up one category by exact slug; a miss is `Ok(None)`.
    pub fn get_by_slug(&self, slug: &str) -> ServiceResult<Option<Category>> {
        let started_at = Instant::now();
        let found = self
            .repo
            .get_category(slug)
            .map_err(|err| log_failure("category_get", slug, started_at, err))?;

        debug!(
            "event=category_get module=category status=ok slug={slug} found={}",
            found.is_some()
        );
        Ok(found)
    }

    /// Checks an untrusted value against the create/update input shape.
    pub fn validate(&self, value: &Value) -> CategoryValidation {
        let result = validate_category(value);
        debug!(
            "event=category_validate module=category status=ok valid={}",
            result.is_valid()
        );
        result
    }

    /// Creates a category from validated input.
    pub fn create(&self, input: &CategoryToCreate) -> ServiceResult<Category> {
        let started_at = Instant::now();
        let created = self
            .repo
            .create_category(input)
            .map_err(|err| log_failure("category_create", &input.slug(), started_at, err))?;

        info!(
            "event=category_create module=category status=ok id={} slug={} duration_ms={}",
            created.id,
            created.slug,
            started_at.elapsed().as_millis()
        );
        Ok(created)
    }

    /// Validates an untrusted value, then creates it.
    pub fn create_from_value(&self, value: &Value) -> ServiceResult<Category> {
        let input = self.checked_input("category_create", value)?;
        self.create(&input)
    }

    /// Retitles the category found by `slug`.
    ///
    /// # Errors
    /// - `ServiceError::NotFound` when `slug` matches nothing.
    pub fn update(&self, slug: &str, input: &CategoryToCreate) -> ServiceResult<Category> {
        let started_at = Instant::now();
        let updated = self
            .repo
            .update_category(slug, input)
            .map_err(|err| log_failure("category_update", slug, started_at, err))?;

        info!(
            "event=category_update module=category status=ok id={} slug={} new_slug={} duration_ms={}",
            updated.id,
            slug,
            updated.slug,
            started_at.elapsed().as_millis()
        );
        Ok(updated)
    }

    /// Validates an untrusted value, then applies it as an update.
    pub fn update_from_value(&self, slug: &str, value: &Value) -> ServiceResult<Category> {
        let input = self.checked_input("category_update", value)?;
        self.update(slug, &input)
    }

    /// Deletes the category found by `slug` and returns it.
    ///
    /// # Errors
    /// - `ServiceError::NotFound` when `slug` matches nothing.
    pub fn remove(&self, slug: &str) -> ServiceResult<Category> {
        let started_at = Instant::now();
        let removed = self
            .repo
            .delete_category(slug)
            .map_err(|err| log_failure("category_delete", slug, started_at, err))?;

        info!(
            "event=category_delete module=category status=ok id={} slug={} duration_ms={}",
            removed.id,
            removed.slug,
            started_at.elapsed().as_millis()
        );
        Ok(removed)
    }

    fn checked_input(&self, event: &str, value: &Value) -> ServiceResult<CategoryToCreate> {
        validate_category(value).into_result().map_err(|issues| {
            warn!(
                "event={event} module=category status=rejected error_code=invalid_input issues={}",
                issues.len()
            );
            ServiceError::Invalid(issues)
        })
    }
}

fn log_failure(event: &str, slug: &str, started_at: Instant, err: RepoError) -> ServiceError {
    let duration_ms = started_at.elapsed().as_millis();
    match &err {
        RepoError::NotFound(_) => warn!(
            "event={event} module=category status=not_found slug={slug} duration_ms={duration_ms}"
        ),
        RepoError::Validation(_) | RepoError::DuplicateSlug(_) => warn!(
            "event={event} module=category status=rejected slug={slug} duration_ms={duration_ms} error={err}"
        ),
        _ => error!(
            "event={event} module=category status=error slug={slug} duration_ms={duration_ms} error={err}"
        ),
    }
    err.into()
}
