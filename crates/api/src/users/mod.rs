//! User accounts.
//!
//! - [`models`] -- the account record and its safe API view.
//! - [`store`] -- the [`UserStore`](store::UserStore) trait and an in-memory implementation.

pub mod models;
pub mod store;
