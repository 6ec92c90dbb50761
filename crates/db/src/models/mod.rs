//! Row structs for the tables this crate reads.

pub mod order;
