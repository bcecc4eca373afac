//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod cache_control;
pub mod classes;
pub mod error;
pub mod health;
pub mod records_dto;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
pub mod students;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
