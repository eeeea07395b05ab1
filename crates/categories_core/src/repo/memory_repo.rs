//! In-memory category repository.
//!
//! Substitute store for tests and callers without SQLite. Mirrors the SQLite
//! semantics: ids count up from 1, slugs are unique, misses are `NotFound`.

use crate::model::category::{default_categories, Category, CategoryId, CategoryToCreate};
use crate::repo::category_repo::{CategoryRepository, RepoError, RepoResult};
use std::cell::RefCell;

#[derive(Debug, Default)]
struct MemoryState {
    last_id: CategoryId,
    rows: Vec<Category>,
}

/// `Vec`-backed category store kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryCategoryRepository {
    state: RefCell<MemoryState>,
}

impl InMemoryCategoryRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the html/css/js fixture.
    pub fn with_defaults() -> Self {
        let rows = default_categories();
        let last_id = rows.iter().map(|c| c.id).max().unwrap_or(0);
        Self {
            state: RefCell::new(MemoryState { last_id, rows }),
        }
    }
}

impl CategoryRepository for InMemoryCategoryRepository {
    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        Ok(self.state.borrow().rows.clone())
    }

    fn get_category(&self, slug: &str) -> RepoResult<Option<Category>> {
        let state = self.state.borrow();
        Ok(state.rows.iter().find(|c| c.slug == slug).cloned())
    }

    fn create_category(&self, input: &CategoryToCreate) -> RepoResult<Category> {
        input.validate()?;
        let slug = input.slug();

        let mut state = self.state.borrow_mut();
        if state.rows.iter().any(|c| c.slug == slug) {
            return Err(RepoError::DuplicateSlug(slug));
        }

        state.last_id += 1;
        let category = Category {
            id: state.last_id,
            title: input.title.clone(),
            slug,
        };
        state.rows.push(category.clone());
        Ok(category)
    }

    fn update_category(&self, slug: &str, input: &CategoryToCreate) -> RepoResult<Category> {
        input.validate()?;
        let new_slug = input.slug();

        let mut state = self.state.borrow_mut();
        let index = state
            .rows
            .iter()
            .position(|c| c.slug == slug)
            .ok_or_else(|| RepoError::NotFound(slug.to_string()))?;

        let conflict = state
            .rows
            .iter()
            .enumerate()
            .any(|(i, c)| i != index && c.slug == new_slug);
        if conflict {
            return Err(RepoError::DuplicateSlug(new_slug));
        }

        let row = &mut state.rows[index];
        row.title = input.title.clone();
        row.slug = new_slug;
        Ok(row.clone())
    }

    fn delete_category(&self, slug: &str) -> RepoResult<Category> {
        let mut state = self.state.borrow_mut();
        let index = state
            .rows
            .iter()
            .position(|c| c.slug == slug)
            .ok_or_else(|| RepoError::NotFound(slug.to_string()))?;
        Ok(state.rows.remove(index))
    }
}
