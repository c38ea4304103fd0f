//! # Monis Server Library
//!
//! Core library for the Monis HTTP API.
//!
//! ## Module Organization
//! ```text
//! monis_server/
//! ├── lib.rs          ◄─── You are here (startup wiring)
//! ├── config.rs       ◄─── Environment configuration
//! ├── auth.rs         ◄─── JWT identity for order history
//! ├── state.rs        ◄─── AppState + shared workspace engine
//! ├── error.rs        ◄─── API error type for handlers
//! └── routes/
//!     ├── mod.rs      ◄─── Router assembly
//!     ├── products.rs ◄─── Catalog endpoint (with fallback)
//!     ├── workspace.rs◄─── One route per engine operation
//!     └── orders.rs   ◄─── Submission + history
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use tracing::{info, warn};

use auth::JwtManager;
use config::ServerConfig;
use monis_core::catalog::builtin_catalog;
use monis_core::{Workspace, SNAPSHOT_KEY};
use monis_db::{Database, DbConfig};
use state::{AppState, WorkspaceState};

/// Builds application state from configuration.
///
/// ## Startup Sequence
/// ```text
/// 1. Connect to SQLite (WAL mode, migrations)
///    └── on failure: run WITHOUT a database - built-in catalog, mock
///        orders, no snapshot persistence
/// 2. Seed the catalog from the built-in list when the table is empty
/// 3. Restore the persisted workspace snapshot, if any
/// 4. Wire up the JWT manager
/// ```
pub async fn init_state(config: &ServerConfig) -> AppState {
    let db = match Database::new(DbConfig::new(&config.database_path)).await {
        Ok(db) => {
            info!("Database connected and migrations applied");
            Some(db)
        }
        Err(e) => {
            warn!(error = %e, "Database unavailable, running in degraded mode");
            None
        }
    };

    if let Some(db) = &db {
        match db.products().count().await {
            Ok(0) => {
                if let Err(e) = db.products().seed(&builtin_catalog()).await {
                    warn!(error = %e, "Failed to seed catalog");
                }
            }
            Ok(count) => info!(count, "Catalog already populated"),
            Err(e) => warn!(error = %e, "Failed to inspect catalog"),
        }
    }

    let workspace = match &db {
        Some(db) => match db.snapshots().load(SNAPSHOT_KEY).await {
            Ok(Some(snapshot)) => {
                info!("Restored workspace snapshot");
                WorkspaceState::from_workspace(Workspace::from_snapshot(snapshot))
            }
            Ok(None) => WorkspaceState::new(),
            Err(e) => {
                warn!(error = %e, "Failed to load workspace snapshot");
                WorkspaceState::new()
            }
        },
        None => WorkspaceState::new(),
    };

    AppState::new(db, workspace, JwtManager::new(config.jwt_secret.clone()))
}
