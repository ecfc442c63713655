//! Application layer
//!
//! Use cases that orchestrate domain services to implement the
//! application's workflows. Each file holds one use case.

pub mod admin;
pub mod auth;
pub mod client;
pub mod invoice;
pub mod settings;
