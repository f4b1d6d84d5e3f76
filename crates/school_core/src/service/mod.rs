//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into the add and list-nearest use cases.
//! - Keep the HTTP layer decoupled from storage details.

pub mod school_service;
