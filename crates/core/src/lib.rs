//! Domain logic for the CE orders dashboard.
//!
//! Everything here is pure: no I/O, no clocks other than the ones passed in.
//! The database, partner sync client, and HTTP layers build on these types.

pub mod batching;
pub mod error;
pub mod order;
pub mod report;
pub mod types;
pub mod window;
