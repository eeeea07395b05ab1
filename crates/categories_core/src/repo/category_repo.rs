//! Category repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/get/create/update/delete over the `categories` table.
//! - Map SQLite outcomes onto semantic errors (`NotFound`, `DuplicateSlug`).
//!
//! # Invariants
//! - Every write is a single `... RETURNING` statement.
//! - Rows read back are validated; bad persisted data is not masked.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::category::{Category, CategoryToCreate, CategoryValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CATEGORY_TABLE: &str = "categories";
const REQUIRED_COLUMNS: &[&str] = &["id", "title", "slug"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for category persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(CategoryValidationError),
    Db(DbError),
    /// No category has the given slug.
    NotFound(String),
    /// The write would give two categories the same slug.
    DuplicateSlug(String),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(slug) => write!(f, "category not found: {slug}"),
            Self::DuplicateSlug(slug) => write!(f, "category slug already exists: {slug}"),
            Self::InvalidData(message) => write!(f, "invalid persisted category data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CategoryValidationError> for RepoError {
    fn from(value: CategoryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data-access contract for categories.
pub trait CategoryRepository {
    /// All categories, possibly empty.
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    /// Exact slug lookup; a miss is `Ok(None)`.
    fn get_category(&self, slug: &str) -> RepoResult<Option<Category>>;
    /// Inserts a category and returns it with its assigned id.
    fn create_category(&self, input: &CategoryToCreate) -> RepoResult<Category>;
    /// Retitles the category found by `slug`, recomputing its slug.
    fn update_category(&self, slug: &str, input: &CategoryToCreate) -> RepoResult<Category>;
    /// Deletes the category found by `slug` and returns the removed row.
    fn delete_category(&self, slug: &str) -> RepoResult<Category>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Wraps a connection returned by `db::open_db` / `db::open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` on schema drift.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, slug FROM categories ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();

        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }

        Ok(categories)
    }

    fn get_category(&self, slug: &str) -> RepoResult<Option<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, slug FROM categories WHERE slug = ?1;")?;
        let mut rows = stmt.query([slug])?;

        match rows.next()? {
            Some(row) => Ok(Some(parse_category_row(row)?)),
            None => Ok(None),
        }
    }

    fn create_category(&self, input: &CategoryToCreate) -> RepoResult<Category> {
        input.validate()?;
        let slug = input.slug();

        // The closure returns a nested result so read-back validation keeps
        // its own error kind instead of becoming a `rusqlite::Error`.
        self.conn
            .query_row(
                "INSERT INTO categories (title, slug)
                 VALUES (?1, ?2)
                 RETURNING id, title, slug;",
                params![input.title, slug],
                |row| Ok(parse_category_row(row)),
            )
            .map_err(|err| map_write_error(err, &slug))?
    }

    fn update_category(&self, slug: &str, input: &CategoryToCreate) -> RepoResult<Category> {
        input.validate()?;
        let new_slug = input.slug();

        let updated = self
            .conn
            .query_row(
                "UPDATE categories
                 SET title = ?1, slug = ?2
                 WHERE slug = ?3
                 RETURNING id, title, slug;",
                params![input.title, new_slug, slug],
                |row| Ok(parse_category_row(row)),
            )
            .optional()
            .map_err(|err| map_write_error(err, &new_slug))?;

        match updated {
            Some(category) => category,
            None => Err(RepoError::NotFound(slug.to_string())),
        }
    }

    fn delete_category(&self, slug: &str) -> RepoResult<Category> {
        let deleted = self
            .conn
            .query_row(
                "DELETE FROM categories
                 WHERE slug = ?1
                 RETURNING id, title, slug;",
                [slug],
                |row| Ok(parse_category_row(row)),
            )
            .optional()?;

        match deleted {
            Some(category) => category,
            None => Err(RepoError::NotFound(slug.to_string())),
        }
    }
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let category = Category {
        id: row.get("id")?,
        title: row.get("title")?,
        slug: row.get("slug")?,
    };
    category.validate().map_err(|err| {
        RepoError::InvalidData(format!(
            "category id {} has invalid title: {err}",
            category.id
        ))
    })?;
    Ok(category)
}

fn map_write_error(err: rusqlite::Error, slug: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::DuplicateSlug(slug.to_string())
        }
        _ => err.into(),
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([CATEGORY_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        return Err(RepoError::MissingRequiredTable(CATEGORY_TABLE));
    }
    if let Some(column) = REQUIRED_COLUMNS
        .iter()
        .copied()
        .find(|column| !columns.iter().any(|name| name == column))
    {
        return Err(RepoError::MissingRequiredColumn {
            table: CATEGORY_TABLE,
            column,
        });
    }

    Ok(())
}
