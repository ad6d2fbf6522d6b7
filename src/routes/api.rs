use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{ERR_UNKNOWN_ACTION, MSG_GIFTS_SAVED, MSG_RSVP_RECEIVED};
use crate::error::{AppError, Result};
use crate::models::GuestStatus;
use crate::routes::{DataResponse, MessageResponse};
use crate::services::{gifts, guest_session, guestbook, rsvp, RsvpSubmission};
use crate::AppState;

/// Body of `POST /api`; which fields matter depends on `action`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiRequest {
    pub action: Option<String>,
    // login
    pub name: Option<String>,
    #[serde(rename = "loginToken")]
    pub login_token: Option<String>,
    // rsvp, save_gifts, post_message
    pub nome: Option<String>,
    pub guests: Option<Value>,
    pub phone: Option<Value>,
    pub message: Option<String>,
    #[serde(rename = "selectedGifts")]
    pub selected_gifts: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    #[serde(rename = "guestName")]
    pub guest_name: String,
    #[serde(rename = "guestStatus")]
    pub guest_status: GuestStatus,
    pub table: Option<String>,
}

/// Form values may arrive as JSON strings or numbers
fn value_text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Guest-facing actions
///
/// POST /api with `{"action": "login" | "rsvp" | "save_gifts" | "post_message", ...}`
pub async fn api_action(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ApiRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    match request.action.as_deref() {
        Some("login") => {
            let outcome = guest_session::login(
                &state.db,
                request.name.as_deref(),
                request.login_token.as_deref(),
            )
            .await?;

            Ok(Json(LoginResponse {
                status: "success",
                guest_name: outcome.guest_name,
                guest_status: outcome.status,
                table: outcome.table,
            })
            .into_response())
        }
        Some("rsvp") => {
            let submission = RsvpSubmission {
                nome: request.nome.unwrap_or_default(),
                guests: value_text(request.guests),
                phone: value_text(request.phone),
                message: request.message.unwrap_or_default(),
            };
            rsvp::submit_rsvp(&state.db, submission).await?;

            Ok(Json(MessageResponse::success(MSG_RSVP_RECEIVED)).into_response())
        }
        Some("save_gifts") => {
            gifts::save_gifts(&state.db, request.nome.as_deref(), request.selected_gifts).await?;

            Ok(Json(MessageResponse::success(MSG_GIFTS_SAVED)).into_response())
        }
        Some("post_message") => {
            let message = guestbook::post_message(
                &state.db,
                request.nome.as_deref(),
                request.message.as_deref(),
            )
            .await?;

            Ok((StatusCode::CREATED, Json(DataResponse::success(message))).into_response())
        }
        other => {
            tracing::warn!("Unknown API action: {:?}", other);
            Err(AppError::UnknownAction(ERR_UNKNOWN_ACTION))
        }
    }
}
