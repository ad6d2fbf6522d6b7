use chrono::Utc;
use redb::ReadableTable;

use crate::db::{append_record, decode, encode, tables, Db};
use crate::error::Result;
use crate::models::{normalize_name, Guest, GuestStatus, RsvpRecord};

/// Fields of an RSVP form; absent fields are stored empty
#[derive(Debug, Clone, Default)]
pub struct RsvpSubmission {
    pub nome: String,
    pub guests: String,
    pub phone: String,
    pub message: String,
}

/// What happened to the matching guest's status
#[derive(Debug, Clone, PartialEq)]
pub enum StatusUpdate {
    Applied { previous: GuestStatus },
    NoMatchingGuest,
    /// Guest carries a status RSVPs may not overwrite
    Blocked(GuestStatus),
    Failed(String),
}

/// Result of an RSVP: the record is always stored, the status update is advisory
#[derive(Debug, Clone, PartialEq)]
pub struct RsvpOutcome {
    pub record_id: u64,
    pub status_update: StatusUpdate,
}

/// Append an RSVP, then try to mark the matching guest as confirmed
///
/// Only the append can fail the call. The two writes are separate
/// transactions; a failed status update is logged and reported in the outcome.
pub async fn submit_rsvp(db: &Db, submission: RsvpSubmission) -> Result<RsvpOutcome> {
    let record = RsvpRecord {
        timestamp: Utc::now(),
        nome: submission.nome.clone(),
        guests: submission.guests.clone(),
        phone: submission.phone,
        message: submission.message,
    };

    let append_db = db.clone();
    let record_id =
        tokio::task::spawn_blocking(move || append_record(&append_db, tables::RSVPS, &record))
            .await??;

    tracing::info!("RSVP #{} received from {}", record_id, submission.nome);

    let update_db = db.clone();
    let name = submission.nome;
    let party = submission.guests;
    let status_update = match tokio::task::spawn_blocking(move || {
        confirm_guest(&update_db, &name, &party)
    })
    .await
    {
        Ok(Ok(update)) => update,
        Ok(Err(e)) => {
            tracing::error!("Failed to update guest status after RSVP #{}: {}", record_id, e);
            StatusUpdate::Failed(e.to_string())
        }
        Err(e) => {
            tracing::error!("Status update task failed after RSVP #{}: {}", record_id, e);
            StatusUpdate::Failed(e.to_string())
        }
    };

    match &status_update {
        StatusUpdate::NoMatchingGuest => {
            tracing::info!("RSVP #{} does not match any guest", record_id)
        }
        StatusUpdate::Blocked(status) => tracing::warn!(
            "RSVP #{} left guest status '{}' unchanged",
            record_id,
            status
        ),
        _ => {}
    }

    Ok(RsvpOutcome {
        record_id,
        status_update,
    })
}

/// Set `Confirmed(party)` on the guest matching `name`, unless its status is custom
fn confirm_guest(db: &Db, name: &str, party: &str) -> Result<StatusUpdate> {
    let key = normalize_name(name);
    if key.is_empty() {
        return Ok(StatusUpdate::NoMatchingGuest);
    }

    let write_txn = db.begin_write()?;
    let update = {
        let mut guests = write_txn.open_table(tables::GUESTS)?;
        let existing: Option<Guest> = match guests.get(key.as_str())? {
            Some(bytes) => Some(decode(bytes.value())?),
            None => None,
        };

        match existing {
            None => StatusUpdate::NoMatchingGuest,
            Some(guest) if !guest.status.accepts_confirmation() => {
                StatusUpdate::Blocked(guest.status)
            }
            Some(mut guest) => {
                let previous = std::mem::replace(
                    &mut guest.status,
                    GuestStatus::Confirmed(party.trim().to_string()),
                );
                let bytes = encode(&guest)?;
                guests.insert(key.as_str(), bytes.as_slice())?;
                StatusUpdate::Applied { previous }
            }
        }
    };
    write_txn.commit()?;

    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{count_records, temp_db};
    use crate::db::{import_guests, list_named};

    fn submission(nome: &str, guests: &str) -> RsvpSubmission {
        RsvpSubmission {
            nome: nome.to_string(),
            guests: guests.to_string(),
            phone: "912345678".to_string(),
            message: "Lá estaremos".to_string(),
        }
    }

    fn status_of(db: &Db, name: &str) -> GuestStatus {
        let guests: Vec<Guest> = list_named(db, tables::GUESTS).unwrap();
        guests
            .into_iter()
            .find(|g| g.name == name)
            .map(|g| g.status)
            .unwrap()
    }

    #[tokio::test]
    async fn test_rsvp_confirms_guest() {
        let (_dir, db) = temp_db();
        import_guests(&db, vec![Guest::new("Ana")]).unwrap();

        let outcome = submit_rsvp(&db, submission(" ana ", "2")).await.unwrap();

        assert_eq!(
            outcome.status_update,
            StatusUpdate::Applied {
                previous: GuestStatus::Pending
            }
        );
        assert_eq!(status_of(&db, "Ana"), GuestStatus::Confirmed("2".into()));
    }

    #[tokio::test]
    async fn test_rsvp_reconfirmation_overwrites_party() {
        let (_dir, db) = temp_db();
        import_guests(&db, vec![Guest::new("Ana")]).unwrap();

        submit_rsvp(&db, submission("Ana", "2")).await.unwrap();
        submit_rsvp(&db, submission("Ana", "3")).await.unwrap();

        assert_eq!(status_of(&db, "Ana"), GuestStatus::Confirmed("3".into()));
    }

    #[tokio::test]
    async fn test_rsvp_always_appends() {
        let (_dir, db) = temp_db();

        let first = submit_rsvp(&db, submission("Ana", "2")).await.unwrap();
        let second = submit_rsvp(&db, submission("Ana", "2")).await.unwrap();

        assert_eq!(second.record_id, first.record_id + 1);
        assert_eq!(count_records(&db, tables::RSVPS), 2);
    }

    #[tokio::test]
    async fn test_rsvp_unknown_guest_still_succeeds() {
        let (_dir, db) = temp_db();

        let outcome = submit_rsvp(&db, submission("Desconhecido", "1")).await.unwrap();

        assert_eq!(outcome.status_update, StatusUpdate::NoMatchingGuest);
        assert_eq!(count_records(&db, tables::RSVPS), 1);
    }

    #[tokio::test]
    async fn test_rsvp_custom_status_is_blocked() {
        let (_dir, db) = temp_db();
        let mut guest = Guest::new("Rui");
        guest.status = GuestStatus::Custom("Recusou".into());
        import_guests(&db, vec![guest]).unwrap();

        let outcome = submit_rsvp(&db, submission("Rui", "1")).await.unwrap();

        assert_eq!(
            outcome.status_update,
            StatusUpdate::Blocked(GuestStatus::Custom("Recusou".into()))
        );
        assert_eq!(status_of(&db, "Rui"), GuestStatus::Custom("Recusou".into()));
    }

    #[tokio::test]
    async fn test_rsvp_kept_when_guest_row_unreadable() {
        let (_dir, db) = temp_db();
        import_guests(&db, vec![Guest::new("Ana")]).unwrap();

        let write_txn = db.begin_write().unwrap();
        {
            let mut guests = write_txn.open_table(tables::GUESTS).unwrap();
            guests.insert("ana", &[0xFF_u8; 4][..]).unwrap();
        }
        write_txn.commit().unwrap();

        let outcome = submit_rsvp(&db, submission("Ana", "2")).await.unwrap();

        assert!(matches!(outcome.status_update, StatusUpdate::Failed(_)));
        assert_eq!(outcome.record_id, 1);
        assert_eq!(count_records(&db, tables::RSVPS), 1);
    }
}
