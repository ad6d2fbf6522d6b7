use redb::ReadableTable;

use crate::constants::ERR_INCOMPLETE_DATA;
use crate::db::{decode, encode, tables, Db};
use crate::error::{AppError, Result};
use crate::models::{non_blank, normalize_name, Guest, GuestStatus};

/// Successful login
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub guest_name: String,
    pub status: GuestStatus,
    pub table: Option<String>,
    /// This login bound the device token
    pub first_login: bool,
}

impl LoginOutcome {
    fn from_guest(guest: Guest, first_login: bool) -> Self {
        Self {
            guest_name: guest.name,
            status: guest.status,
            table: guest.table,
            first_login,
        }
    }
}

/// Resolve a claimed guest name and device token into a session
///
/// The first login binds the token and opens the invite. Later logins must
/// present the same token; any other token is a device conflict until the
/// binding is cleared by an admin.
pub async fn login(
    db: &Db,
    name: Option<&str>,
    device_token: Option<&str>,
) -> Result<LoginOutcome> {
    let (name, device_token) = match (non_blank(name), non_blank(device_token)) {
        (Some(n), Some(t)) => (n.to_string(), t.to_string()),
        _ => return Err(AppError::InvalidInput(ERR_INCOMPLETE_DATA.to_string())),
    };

    let db = db.clone();
    tokio::task::spawn_blocking(move || -> Result<LoginOutcome> {
        let key = normalize_name(&name);

        // Write transaction so the check-and-bind is atomic per guest
        let write_txn = db.begin_write()?;
        let outcome = {
            let mut guests = write_txn.open_table(tables::GUESTS)?;
            let mut guest: Guest = match guests.get(key.as_str())? {
                Some(bytes) => decode(bytes.value())?,
                None => {
                    tracing::info!("Login attempt for unknown guest: {}", name);
                    return Err(AppError::GuestNotFound);
                }
            };

            match guest.device_token.as_deref() {
                None => {
                    guest.device_token = Some(device_token);
                    if guest.status == GuestStatus::Pending {
                        guest.status = GuestStatus::InviteOpened;
                    }
                    let bytes = encode(&guest)?;
                    guests.insert(key.as_str(), bytes.as_slice())?;
                    tracing::info!("Invite opened by {}", guest.name);
                    LoginOutcome::from_guest(guest, true)
                }
                Some(bound) if bound == device_token => LoginOutcome::from_guest(guest, false),
                Some(_) => {
                    tracing::warn!("Device conflict for guest {}", guest.name);
                    return Err(AppError::DeviceConflict);
                }
            }
        };

        if outcome.first_login {
            write_txn.commit()?;
        } else {
            write_txn.abort()?;
        }

        Ok(outcome)
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::import_guests;
    use crate::db::test_support::temp_db;

    fn seeded() -> (tempfile::TempDir, Db) {
        let (dir, db) = temp_db();
        import_guests(&db, vec![Guest::new("Ana").with_table("4"), Guest::new("Rui")]).unwrap();
        (dir, db)
    }

    #[tokio::test]
    async fn test_first_login_binds_device() {
        let (_dir, db) = seeded();

        let outcome = login(&db, Some("Ana"), Some("dev1")).await.unwrap();

        assert_eq!(outcome.guest_name, "Ana");
        assert_eq!(outcome.status, GuestStatus::InviteOpened);
        assert_eq!(outcome.table.as_deref(), Some("4"));
        assert!(outcome.first_login);
    }

    #[tokio::test]
    async fn test_same_device_is_idempotent() {
        let (_dir, db) = seeded();
        login(&db, Some("Ana"), Some("dev1")).await.unwrap();

        let again = login(&db, Some("  ana "), Some("dev1")).await.unwrap();
        let third = login(&db, Some("ANA"), Some("dev1")).await.unwrap();

        assert!(!again.first_login);
        assert_eq!(again, third);
        assert_eq!(again.status, GuestStatus::InviteOpened);
    }

    #[tokio::test]
    async fn test_other_device_is_forbidden() {
        let (_dir, db) = seeded();
        login(&db, Some("Ana"), Some("dev1")).await.unwrap();

        for _ in 0..3 {
            let result = login(&db, Some("Ana"), Some("dev2")).await;
            assert!(matches!(result, Err(AppError::DeviceConflict)));
        }

        // Original device still works
        assert!(login(&db, Some("ana"), Some("dev1")).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_guest() {
        let (_dir, db) = seeded();
        let result = login(&db, Some("Zé"), Some("dev1")).await;
        assert!(matches!(result, Err(AppError::GuestNotFound)));
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let (_dir, db) = seeded();
        assert!(matches!(
            login(&db, None, Some("dev1")).await,
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            login(&db, Some("Ana"), Some("  ")).await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_first_login_keeps_later_status() {
        let (_dir, db) = temp_db();
        let mut guest = Guest::new("Rita");
        guest.status = GuestStatus::Confirmed("2".into());
        import_guests(&db, vec![guest]).unwrap();

        let outcome = login(&db, Some("Rita"), Some("dev1")).await.unwrap();

        assert!(outcome.first_login);
        assert_eq!(outcome.status, GuestStatus::Confirmed("2".into()));
    }
}
