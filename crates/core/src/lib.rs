//! Domain primitives shared by every Pressroom crate.
//!
//! This crate has no internal dependencies so the API layer and any future
//! worker or CLI tooling can use the same error and identifier types.

pub mod error;
pub mod types;
pub mod users;
