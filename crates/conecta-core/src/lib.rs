//! Core Conecta client library (input masking, address lookup, auth, API client, config).

pub mod account;
pub mod address;
pub mod api;
pub mod auth;
pub mod config;
pub mod ibge;
pub mod input;
pub mod viacep;
