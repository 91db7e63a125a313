pub mod auth;
pub mod common;
pub mod config;
pub mod errors;
pub mod records;
pub mod tokenize;

pub mod app_context;
pub use app_context::AppContext;
pub mod database;
pub mod server;
pub mod services;

#[cfg(feature = "graphql")]
pub mod graphql;
