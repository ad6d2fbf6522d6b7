use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::constants::{ERR_UNKNOWN_ADMIN_ACTION, MSG_DEVICE_RESET};
use crate::error::{AppError, Result};
use crate::models::GuestSummary;
use crate::routes::DataResponse;
use crate::services::{admin, gifts, guestbook};
use crate::AppState;

/// Body of `POST /admin-api`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AdminRequest {
    pub password: Option<String>,
    pub action: Option<String>,
    /// Target guest for `reset_device`
    pub nome: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResetDeviceResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub data: GuestSummary,
}

/// Admin panel endpoint
///
/// Every action requires the shared admin password, checked before the
/// action is looked at.
///
/// POST /admin-api with `{"password": ..., "action": ...}`
pub async fn admin_action(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AdminRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    admin::authenticate(&state.config, request.password.as_deref())?;

    let action = request.action.as_deref().unwrap_or_default();
    tracing::info!("Admin action: {}", action);

    let response = match action {
        "get_rsvps" => {
            Json(DataResponse::success(admin::list_rsvps(&state.db).await?)).into_response()
        }
        "get_gifts" => {
            Json(DataResponse::success(gifts::list_gifts(&state.db).await?)).into_response()
        }
        "get_comprovativos" => {
            Json(DataResponse::success(admin::list_proofs(&state.db).await?)).into_response()
        }
        "get_messages" => {
            Json(DataResponse::success(guestbook::list_messages(&state.db).await?)).into_response()
        }
        "get_guests" => {
            Json(DataResponse::success(admin::list_guests(&state.db).await?)).into_response()
        }
        "reset_device" => {
            let guest = admin::reset_device(&state.db, request.nome.as_deref()).await?;
            Json(ResetDeviceResponse {
                status: "success",
                message: MSG_DEVICE_RESET,
                data: guest,
            })
            .into_response()
        }
        _ => return Err(AppError::UnknownAction(ERR_UNKNOWN_ADMIN_ACTION)),
    };

    Ok(response)
}
