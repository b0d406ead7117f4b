//! REST API modules.

pub mod health;
