//! Domain models for the grocery app.
//!
//! These types represent validated domain objects separate from database row types.

pub mod item;
pub mod session;
pub mod store;
pub mod user;

pub use item::Item;
pub use session::{CurrentUser, keys as session_keys};
pub use store::Store;
pub use user::User;
