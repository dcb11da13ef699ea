//! Error handling for the lobby backend.

pub mod domain;

pub use domain::DomainError;
