//! SQLite adapters.
//!
//! [`engine`] inspects and queries uploaded database files through
//! rusqlite. [`store`] persists examples and annotations in the
//! application database using Diesel ORM.

pub mod database;
pub mod engine;
pub mod store;
pub mod upload;
