//! Category use-case services.
//!
//! # Responsibility
//! - Orchestrate validation and repository calls into use-case APIs.
//! - Keep callers decoupled from storage details.

pub mod category_service;
