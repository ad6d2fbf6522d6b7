use redb::ReadableTable;
use std::collections::HashMap;

use crate::config::Config;
use crate::constants::{ERR_INCOMPLETE_DATA, TABLE_UNASSIGNED};
use crate::db::{decode, encode, list_named, list_records, tables, Db};
use crate::error::{AppError, Result};
use crate::models::{
    non_blank, normalize_name, Guest, GuestSummary, PaymentProof, RsvpRecord, RsvpWithTable,
};
use crate::security::verify_admin_password;

/// Check the shared admin secret; nothing else runs until this passes
pub fn authenticate(config: &Config, password: Option<&str>) -> Result<()> {
    if verify_admin_password(password.unwrap_or_default(), &config.admin_password) {
        Ok(())
    } else {
        tracing::warn!("Invalid admin password attempt");
        Err(AppError::Unauthorized)
    }
}

/// All RSVPs, newest first, each with the table of the guest of the same name
///
/// Names are matched exactly after trimming and lowercasing; RSVPs whose name
/// matches no guest get `TABLE_UNASSIGNED`.
pub async fn list_rsvps(db: &Db) -> Result<Vec<RsvpWithTable>> {
    let db = db.clone();
    let (mut rsvps, guests) = tokio::task::spawn_blocking(
        move || -> Result<(Vec<RsvpRecord>, Vec<Guest>)> {
            let rsvps = list_records(&db, tables::RSVPS)?;
            let guests = list_named(&db, tables::GUESTS)?;
            Ok((rsvps, guests))
        },
    )
    .await??;

    let tables_by_name: HashMap<String, String> = guests
        .into_iter()
        .filter_map(|g| g.table.map(|table| (normalize_name(&g.name), table)))
        .collect();

    rsvps.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    Ok(rsvps
        .into_iter()
        .map(|record| {
            let mesa = tables_by_name
                .get(&normalize_name(&record.nome))
                .cloned()
                .unwrap_or_else(|| TABLE_UNASSIGNED.to_string());
            RsvpWithTable { record, mesa }
        })
        .collect())
}

/// All payment proofs, newest first
pub async fn list_proofs(db: &Db) -> Result<Vec<PaymentProof>> {
    let db = db.clone();
    let mut proofs: Vec<PaymentProof> =
        tokio::task::spawn_blocking(move || list_records(&db, tables::PAYMENT_PROOFS)).await??;

    proofs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(proofs)
}

/// Guest list as seen by the admin panel, sorted by name
pub async fn list_guests(db: &Db) -> Result<Vec<GuestSummary>> {
    let db = db.clone();
    let guests: Vec<Guest> =
        tokio::task::spawn_blocking(move || list_named(&db, tables::GUESTS)).await??;

    Ok(guests.into_iter().map(GuestSummary::from).collect())
}

/// Clear a guest's bound device so the invite can be opened again
pub async fn reset_device(db: &Db, nome: Option<&str>) -> Result<GuestSummary> {
    let key = match non_blank(nome) {
        Some(n) => normalize_name(n),
        None => return Err(AppError::InvalidInput(ERR_INCOMPLETE_DATA.to_string())),
    };

    let db = db.clone();
    let guest = tokio::task::spawn_blocking(move || -> Result<Guest> {
        let write_txn = db.begin_write()?;
        let guest = {
            let mut guests = write_txn.open_table(tables::GUESTS)?;
            let mut guest: Guest = match guests.get(key.as_str())? {
                Some(bytes) => decode(bytes.value())?,
                None => return Err(AppError::GuestNotFound),
            };
            guest.device_token = None;
            let bytes = encode(&guest)?;
            guests.insert(key.as_str(), bytes.as_slice())?;
            guest
        };
        write_txn.commit()?;
        Ok(guest)
    })
    .await??;

    tracing::info!("Device binding cleared for {}", guest.name);

    Ok(GuestSummary::from(guest))
}
