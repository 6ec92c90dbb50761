//! Partner "force sync" integration.
//!
//! [`client::ForceSyncClient`] asks the partner logistics platform to
//! re-evaluate one order. [`dispatcher::SyncDispatcher`] fans that call out
//! over many orders with a cap on requests in flight.

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod error;

pub use client::{ForceSyncClient, SyncTarget};
pub use config::ForceSyncConfig;
pub use dispatcher::{SyncDispatcher, SyncSummary};
pub use error::SyncError;
