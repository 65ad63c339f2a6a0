//! Database migration command.
//!
//! Applies the migrations embedded from `crates/web/migrations/`: the
//! `grocery` schema with its tables, and the `tower_sessions` session table.

use super::{CliError, connect};

/// Run all pending migrations.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../web/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
