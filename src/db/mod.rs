pub mod import;
pub mod tables;

use redb::{
    Database, Error as RedbError, ReadableDatabase, ReadableTable, StorageError, Table,
    TableDefinition,
};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;

pub use import::{import_guests, load_guest_list};

/// Database handle type (Arc-wrapped for sharing across handlers)
pub type Db = Arc<Database>;

const BINCODE_CONFIG: bincode::config::Configuration = bincode::config::standard();

/// Open or create the redb database at the given path
///
/// Creates all required tables on first run.
#[allow(clippy::result_large_err)]
pub fn open_database(path: impl AsRef<Path>) -> std::result::Result<Db, RedbError> {
    tracing::info!("Opening database at: {:?}", path.as_ref());

    // Create parent directory if it doesn't exist
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                tracing::error!("Failed to create database directory: {}", e);
                RedbError::Io(e)
            })?;
        }
    }

    let db = Database::create(path)?;

    let write_txn = db.begin_write()?;
    {
        let _ = write_txn.open_table(tables::GUESTS)?;
        let _ = write_txn.open_table(tables::RSVPS)?;
        let _ = write_txn.open_table(tables::GIFTS)?;
        let _ = write_txn.open_table(tables::PAYMENT_PROOFS)?;
        let _ = write_txn.open_table(tables::MESSAGES)?;
    }
    write_txn.commit()?;

    tracing::info!("Database initialized successfully");

    Ok(Arc::new(db))
}

pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(bincode::serde::encode_to_vec(value, BINCODE_CONFIG)?)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let (value, _) = bincode::serde::decode_from_slice(bytes, BINCODE_CONFIG)?;
    Ok(value)
}

/// Next id for an append-only table
fn next_id(table: &Table<'_, u64, &'static [u8]>) -> std::result::Result<u64, StorageError> {
    Ok(table.last()?.map(|(key, _)| key.value() + 1).unwrap_or(1))
}

/// Append a record to a sequence-keyed table, returning its id
pub fn append_record<T: Serialize>(
    db: &Database,
    definition: TableDefinition<'_, u64, &'static [u8]>,
    record: &T,
) -> Result<u64> {
    let bytes = encode(record)?;

    let write_txn = db.begin_write()?;
    let id = {
        let mut table = write_txn.open_table(definition)?;
        let id = next_id(&table)?;
        table.insert(id, bytes.as_slice())?;
        id
    };
    write_txn.commit()?;

    Ok(id)
}

/// All records of a sequence-keyed table, newest id first
pub fn list_records<T: DeserializeOwned>(
    db: &Database,
    definition: TableDefinition<'_, u64, &'static [u8]>,
) -> Result<Vec<T>> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(definition)?;

    let mut records = Vec::new();
    for entry in table.iter()?.rev() {
        let (_, value) = entry?;
        records.push(decode(value.value())?);
    }

    Ok(records)
}

/// All values of a name-keyed table, in key order
pub fn list_named<T: DeserializeOwned>(
    db: &Database,
    definition: TableDefinition<'_, &'static str, &'static [u8]>,
) -> Result<Vec<T>> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(definition)?;

    let mut records = Vec::new();
    for entry in table.iter()? {
        let (_, value) = entry?;
        records.push(decode(value.value())?);
    }

    Ok(records)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use redb::ReadableTableMetadata;
    use tempfile::TempDir;

    /// Fresh database in a temporary directory (keep the TempDir alive)
    pub fn temp_db() -> (TempDir, Db) {
        let temp_dir = TempDir::new().unwrap();
        let db = open_database(temp_dir.path().join("test.db")).unwrap();
        (temp_dir, db)
    }

    /// Count rows in a sequence-keyed table
    pub fn count_records(
        db: &Database,
        definition: TableDefinition<'_, u64, &'static [u8]>,
    ) -> u64 {
        let read_txn = db.begin_read().unwrap();
        let table = read_txn.open_table(definition).unwrap();
        table.len().unwrap()
    }
}
