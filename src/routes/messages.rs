use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::GuestbookMessage;
use crate::routes::DataResponse;
use crate::services::guestbook;
use crate::AppState;

/// Public guestbook wall, newest first
///
/// GET /api/messages
pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<GuestbookMessage>>>> {
    let messages = guestbook::list_messages(&state.db).await?;
    Ok(Json(DataResponse::success(messages)))
}
