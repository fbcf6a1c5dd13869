//! service-core: Shared infrastructure for the advisor services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
