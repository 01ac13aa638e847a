//! CLI command handlers.

pub mod address;
pub mod ads;
pub mod auth;
pub mod categories;
pub mod config;
pub mod publish;
pub mod register;
