//! Utilities shared between the Clicker Race binaries and library crates.

pub mod logger;
pub mod time;
