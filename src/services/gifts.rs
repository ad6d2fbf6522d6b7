use chrono::Utc;

use crate::constants::ERR_INCOMPLETE_DATA;
use crate::db::{encode, list_named, tables, Db};
use crate::error::{AppError, Result};
use crate::models::{non_blank, normalize_name, GiftSelection};

/// Replace the gift selection for a guest name (case-insensitive), or create it
///
/// The stored name is the one sent on this call, so capitalization follows
/// the latest submission.
pub async fn save_gifts(
    db: &Db,
    nome: Option<&str>,
    selected: Option<Vec<String>>,
) -> Result<GiftSelection> {
    let (nome, gifts) = match (nome, selected) {
        (Some(n), Some(items)) if non_blank(Some(n)).is_some() && !items.is_empty() => {
            (n.to_string(), items)
        }
        _ => return Err(AppError::InvalidInput(ERR_INCOMPLETE_DATA.to_string())),
    };

    let selection = GiftSelection {
        timestamp: Utc::now(),
        nome,
        gifts,
    };

    let db = db.clone();
    let stored = selection.clone();
    tokio::task::spawn_blocking(move || -> Result<()> {
        let key = normalize_name(&stored.nome);
        let bytes = encode(&stored)?;

        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(tables::GIFTS)?;
            table.insert(key.as_str(), bytes.as_slice())?;
        }
        write_txn.commit()?;

        Ok(())
    })
    .await??;

    tracing::info!(
        "Gift selection saved for {}: {} items",
        selection.nome,
        selection.gifts.len()
    );

    Ok(selection)
}

/// All gift selections, newest first
pub async fn list_gifts(db: &Db) -> Result<Vec<GiftSelection>> {
    let db = db.clone();
    let mut selections: Vec<GiftSelection> =
        tokio::task::spawn_blocking(move || list_named(&db, tables::GIFTS)).await??;

    selections.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(selections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_db;

    fn items(names: &[&str]) -> Option<Vec<String>> {
        Some(names.iter().map(|s| s.to_string()).collect())
    }

    #[tokio::test]
    async fn test_resubmission_replaces_selection() {
        let (_dir, db) = temp_db();

        save_gifts(&db, Some("Bruno"), items(&["Toaster"])).await.unwrap();
        save_gifts(&db, Some("bruno"), items(&["Toaster", "Kettle"]))
            .await
            .unwrap();

        let all = list_gifts(&db).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].gifts, vec!["Toaster", "Kettle"]);
        assert_eq!(all[0].nome, "bruno");
    }

    #[tokio::test]
    async fn test_name_stored_as_sent() {
        let (_dir, db) = temp_db();

        save_gifts(&db, Some("  Bruno "), items(&["Toaster"])).await.unwrap();
        save_gifts(&db, Some("BRUNO"), items(&["Kettle"])).await.unwrap();
        save_gifts(&db, Some("  Bruno "), items(&["Kettle", "Mixer"]))
            .await
            .unwrap();

        let all = list_gifts(&db).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].nome, "  Bruno ");
        assert_eq!(all[0].gifts, vec!["Kettle", "Mixer"]);
    }

    #[tokio::test]
    async fn test_distinct_guests_keep_separate_selections() {
        let (_dir, db) = temp_db();

        save_gifts(&db, Some("Ana"), items(&["Jarra"])).await.unwrap();
        save_gifts(&db, Some("Rui"), items(&["Panelas"])).await.unwrap();

        let all = list_gifts(&db).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].nome, "Rui");
    }

    #[tokio::test]
    async fn test_requires_name_and_items() {
        let (_dir, db) = temp_db();

        assert!(matches!(
            save_gifts(&db, None, items(&["Jarra"])).await,
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            save_gifts(&db, Some("Ana"), None).await,
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            save_gifts(&db, Some("Ana"), Some(vec![])).await,
            Err(AppError::InvalidInput(_))
        ));
    }
}
