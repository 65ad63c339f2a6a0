//! Grocery store inventory and shopping list web application.
//!
//! This crate provides the web application as a library, allowing it to be
//! tested and reused. The `grocery-web` binary wires it to `PostgreSQL`,
//! Sentry and a TCP listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
