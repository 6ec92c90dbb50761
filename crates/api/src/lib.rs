//! CE orders dashboard server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! export) so integration tests and the binary entrypoint can both use them.

pub mod config;
pub mod error;
pub mod export;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
