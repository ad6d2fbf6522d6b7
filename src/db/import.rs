use redb::{Database, ReadableTable};
use std::collections::HashSet;
use std::path::Path;

use crate::db::{encode, tables};
use crate::error::{AppError, Result};
use crate::models::{normalize_name, Guest, GuestImport};

/// Read a guest list JSON file (array of `{Nome, ChaveUnica?, Status?, deviceToken?, Mesa?}`)
pub fn load_guest_list(path: impl AsRef<Path>) -> Result<Vec<Guest>> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    let entries: Vec<GuestImport> = serde_json::from_str(&raw).map_err(|e| {
        AppError::InvalidInput(format!(
            "Invalid guest list {:?}: {}",
            path.as_ref(),
            e
        ))
    })?;

    Ok(entries.into_iter().map(Guest::from).collect())
}

/// Insert guests that are not stored yet; returns how many were added
///
/// Existing guests are never overwritten, so device bindings and statuses
/// survive a re-import. Within one import the first occurrence of a name wins.
pub fn import_guests(db: &Database, guests: Vec<Guest>) -> Result<usize> {
    let write_txn = db.begin_write()?;
    let mut inserted = 0;
    {
        let mut table = write_txn.open_table(tables::GUESTS)?;
        let mut seen = HashSet::new();

        for guest in guests {
            let key = normalize_name(&guest.name);
            if key.is_empty() {
                tracing::warn!("Skipping guest list entry with a blank name");
                continue;
            }
            if !seen.insert(key.clone()) {
                tracing::warn!("Duplicate guest name in list, keeping first: {}", guest.name);
                continue;
            }
            if table.get(key.as_str())?.is_some() {
                continue;
            }

            let bytes = encode(&guest)?;
            table.insert(key.as_str(), bytes.as_slice())?;
            inserted += 1;
        }
    }
    write_txn.commit()?;

    tracing::info!("Guest import complete: {} new guests", inserted);

    Ok(inserted)
}
