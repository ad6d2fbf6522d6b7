use chrono::Utc;

use crate::constants::{ERR_INCOMPLETE_DATA, ERR_MESSAGE_TOO_LONG};
use crate::db::{append_record, list_records, tables, Db};
use crate::error::{AppError, Result};
use crate::models::{non_blank, GuestbookMessage};

/// Add a message to the guestbook wall
pub async fn post_message(
    db: &Db,
    nome: Option<&str>,
    text: Option<&str>,
) -> Result<GuestbookMessage> {
    // Blank checks only; both values are stored as sent
    let (nome, text) = match (nome, text) {
        (Some(n), Some(t)) if non_blank(Some(n)).is_some() && non_blank(Some(t)).is_some() => {
            (n.to_string(), t.to_string())
        }
        _ => return Err(AppError::InvalidInput(ERR_INCOMPLETE_DATA.to_string())),
    };

    if !GuestbookMessage::validate_text(&text) {
        return Err(AppError::InvalidInput(ERR_MESSAGE_TOO_LONG.to_string()));
    }

    let message = GuestbookMessage {
        timestamp: Utc::now(),
        nome,
        message: text,
    };

    let db = db.clone();
    let record = message.clone();
    let id =
        tokio::task::spawn_blocking(move || append_record(&db, tables::MESSAGES, &record)).await??;

    tracing::info!("Guestbook message #{} from {}", id, message.nome);

    Ok(message)
}

/// All guestbook messages, newest first
pub async fn list_messages(db: &Db) -> Result<Vec<GuestbookMessage>> {
    let db = db.clone();
    let mut messages: Vec<GuestbookMessage> =
        tokio::task::spawn_blocking(move || list_records(&db, tables::MESSAGES)).await??;

    messages.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(messages)
}
