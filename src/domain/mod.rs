pub mod admin;
pub mod auth;
pub mod client;
pub mod invoice;
pub mod settings;
