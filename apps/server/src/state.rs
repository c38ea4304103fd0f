//! # Application State
//!
//! Shared state for API handlers.
//!
//! ## Why Multiple Pieces?
//! The engine, the database handle, and the token manager have different
//! lifecycles and locking needs, so they sit side by side in one cloneable
//! `AppState` instead of behind a single lock:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        AppState (Clone)                                 │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │  Option<Database>│  │  WorkspaceState  │  │  Arc<JwtManager>     │  │
//! │  │                  │  │                  │  │                      │  │
//! │  │  None = degraded │  │  Arc<Mutex<      │  │  read-only after     │  │
//! │  │  (fallback       │  │    Workspace>>   │  │  startup             │  │
//! │  │   catalog, mock  │  │                  │  │                      │  │
//! │  │   orders)        │  │                  │  │                      │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Database has an internal connection pool (thread-safe)              │
//! │  • WorkspaceState: single-writer discipline via Mutex                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::auth::JwtManager;
use monis_core::{Workspace, WorkspaceSnapshot, SNAPSHOT_KEY};
use monis_db::Database;

// =============================================================================
// Workspace State
// =============================================================================

/// Shared workspace engine state.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<Workspace>>`:
/// - `Arc`: shared ownership across handler tasks
/// - `Mutex`: one mutation at a time; every operation runs to completion
///   before the next is observed, matching the engine's single-writer
///   contract
///
/// ## Why Not RwLock?
/// Engine operations are quick and most of them mutate. An RwLock would add
/// complexity with minimal benefit.
#[derive(Debug, Clone)]
pub struct WorkspaceState {
    workspace: Arc<Mutex<Workspace>>,
}

impl WorkspaceState {
    /// Creates state around an empty workspace.
    pub fn new() -> Self {
        WorkspaceState {
            workspace: Arc::new(Mutex::new(Workspace::new())),
        }
    }

    /// Creates state around a restored workspace (e.g. from a snapshot).
    pub fn from_workspace(workspace: Workspace) -> Self {
        WorkspaceState {
            workspace: Arc::new(Mutex::new(workspace)),
        }
    }

    /// Executes a function with read access to the workspace.
    pub fn with_workspace<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Workspace) -> R,
    {
        let ws = self.workspace.lock().expect("Workspace mutex poisoned");
        f(&ws)
    }

    /// Executes a function with write access to the workspace.
    pub fn with_workspace_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Workspace) -> R,
    {
        let mut ws = self.workspace.lock().expect("Workspace mutex poisoned");
        f(&mut ws)
    }
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// App State
// =============================================================================

/// Everything a handler can reach.
#[derive(Clone)]
pub struct AppState {
    /// Database handle; `None` when the store was unreachable at startup.
    /// Handlers degrade per the error policy instead of failing.
    pub db: Option<Database>,

    /// The shared workspace engine.
    pub workspace: WorkspaceState,

    /// Token manager for the order-history endpoint.
    pub jwt: Arc<JwtManager>,
}

impl AppState {
    /// Assembles application state.
    pub fn new(db: Option<Database>, workspace: WorkspaceState, jwt: JwtManager) -> Self {
        AppState {
            db,
            workspace,
            jwt: Arc::new(jwt),
        }
    }

    /// Saves a workspace snapshot after a mutation.
    ///
    /// Persistence is best-effort: a failed save is logged and the request
    /// still succeeds, because the in-memory engine remains authoritative
    /// for the session.
    pub async fn persist_snapshot(&self, snapshot: &WorkspaceSnapshot) {
        if let Some(db) = &self.db {
            if let Err(e) = db.snapshots().save(SNAPSHOT_KEY, snapshot).await {
                warn!(error = %e, "Failed to persist workspace snapshot");
            }
        }
    }

    /// Clears the persisted snapshot (after a completed order).
    pub async fn clear_snapshot(&self) {
        if let Some(db) = &self.db {
            if let Err(e) = db.snapshots().clear(SNAPSHOT_KEY).await {
                warn!(error = %e, "Failed to clear workspace snapshot");
            }
        }
    }
}
