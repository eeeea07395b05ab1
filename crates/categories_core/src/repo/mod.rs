//! Repository layer for the categories store.
//!
//! # Responsibility
//! - Define the category data-access contract.
//! - Keep SQL details out of the service layer.
//!
//! # Invariants
//! - Write paths run `CategoryToCreate::validate()` before touching the store.
//! - "No row matched" surfaces as `RepoError::NotFound`, never as a generic
//!   store fault.

pub mod category_repo;
pub mod memory_repo;
