use axum::{extract::State, Json};
use redb::{ReadableDatabase, ReadableTableMetadata};
use serde_json::{json, Value};

use crate::db::tables;
use crate::error::Result;
use crate::AppState;

/// Liveness of the wedding backend
///
/// Reports whether the guest list can be read, how many invites it holds,
/// and which provider payment proofs are sent to.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let db = state.db.clone();
    let guest_count = tokio::task::spawn_blocking(move || -> Result<u64> {
        let read_txn = db.begin_read()?;
        let guests = read_txn.open_table(tables::GUESTS)?;
        Ok(guests.len()?)
    })
    .await;

    let (status, database, guests) = match guest_count {
        Ok(Ok(count)) => ("healthy", "connected", Some(count)),
        Ok(Err(e)) => {
            tracing::error!("Guest list unreadable during health check: {}", e);
            ("unhealthy", "disconnected", None)
        }
        Err(e) => {
            tracing::error!("Health check task failed: {}", e);
            ("unhealthy", "error", None)
        }
    };

    Json(json!({
        "status": status,
        "database": database,
        "guests": guests,
        "uploads": state.storage.name(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
