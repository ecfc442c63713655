//! Invoicr: multi-tenant invoice creation service.
//!
//! The crate follows a hexagonal layout:
//! - `domain` holds the entities, value objects, ports and services
//! - `application` holds one use case per file on top of the services
//! - `adapters` holds the HTTP surface
//! - `infrastructure` holds configuration, persistence and security

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
