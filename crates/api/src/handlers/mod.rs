pub mod orders;
pub mod web;
