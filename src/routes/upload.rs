use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};

use crate::constants::{MSG_PROOF_UPLOADED, UPLOAD_FILE_FIELD};
use crate::error::{AppError, Result};
use crate::routes::MessageResponse;
use crate::services::upload::upload_proof;
use crate::storage::UploadedFile;
use crate::AppState;

/// Payment proof upload
///
/// POST /api/upload_comprovativo (multipart: `comprovativoFile`, `nome`, `canal`)
pub async fn upload_comprovativo(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<MessageResponse>> {
    let mut multipart = multipart.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    let mut nome = None;
    let mut canal = None;
    let mut file = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            UPLOAD_FILE_FIELD => {
                let original_name = field.file_name().unwrap_or("comprovativo").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                file = Some(UploadedFile {
                    original_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "nome" => nome = Some(field.text().await?),
            "canal" => canal = Some(field.text().await?),
            other => tracing::debug!("Ignoring upload form field: {}", other),
        }
    }

    upload_proof(&state.db, state.storage.as_ref(), nome, canal, file).await?;

    Ok(Json(MessageResponse::success(MSG_PROOF_UPLOADED)))
}
