//! Grocery Core - Shared domain types.
//!
//! This crate provides the types shared by every grocery component:
//! - `web` - The HTTP application (stores, items, shopping lists)
//! - `cli` - Command-line tools for migrations, users and seed data
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP handling. Database encoding is available behind the `postgres`
//! feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, usernames, prices and item categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
