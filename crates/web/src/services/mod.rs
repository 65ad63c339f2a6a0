//! Business logic services.
//!
//! - `auth` - Account registration and password login
pub mod auth;
