//! Category domain model and input validation.
//!
//! # Responsibility
//! - Define the persisted `Category` record and the `CategoryToCreate` input.
//! - Own title bounds and slug derivation so every write path shares them.
//!
//! # Invariants
//! - A `Category` id is assigned by the store and never supplied by callers.
//! - `slug` is always `derive_slug(title)` at the moment of the write.

pub mod category;
pub mod validation;
