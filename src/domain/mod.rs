//! Domain layer - Pure business abstractions
//!
//! This layer contains NO web framework dependencies (no Axum).
//! Only trait definitions, DTOs and domain error types.

pub mod errors;
pub mod repositories;

pub use errors::DomainError;
pub use repositories::*;
