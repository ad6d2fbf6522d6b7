use chrono::Utc;

use crate::constants::ERR_FILE_MISSING;
use crate::db::{append_record, tables, Db};
use crate::error::{AppError, Result};
use crate::models::PaymentProof;
use crate::storage::{ProofStorage, UploadedFile};

/// Hand the file to the storage provider and record where it went
///
/// No guest matching happens here; every upload is a new row.
pub async fn upload_proof(
    db: &Db,
    storage: &dyn ProofStorage,
    nome: Option<String>,
    canal: Option<String>,
    file: Option<UploadedFile>,
) -> Result<PaymentProof> {
    let file = match file {
        Some(f) if !f.bytes.is_empty() => f,
        _ => return Err(AppError::InvalidInput(ERR_FILE_MISSING.to_string())),
    };

    let uploaded_at = Utc::now();
    let original_name = file.original_name.clone();
    let size = file.bytes.len();
    let stored = storage.store(file, uploaded_at).await?;

    let proof = PaymentProof {
        timestamp: uploaded_at,
        nome: nome.unwrap_or_default(),
        canal: canal.unwrap_or_default(),
        file_name: stored.url,
        original_name,
        public_id: Some(stored.public_id),
    };

    let db = db.clone();
    let record = proof.clone();
    let id =
        tokio::task::spawn_blocking(move || append_record(&db, tables::PAYMENT_PROOFS, &record))
            .await??;

    tracing::info!(
        "Payment proof #{} from {} via {} ({} bytes, {})",
        id,
        proof.nome,
        storage.name(),
        size,
        proof.canal
    );

    Ok(proof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::list_records;
    use crate::db::test_support::{count_records, temp_db};
    use crate::storage::{LocalStorage, StoredFile};
    use async_trait::async_trait;
    use chrono::DateTime;

    struct FailingStorage;

    #[async_trait]
    impl ProofStorage for FailingStorage {
        async fn store(&self, _file: UploadedFile, _at: DateTime<Utc>) -> Result<StoredFile> {
            Err(AppError::UploadProvider("provider offline".into()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn file(bytes: &[u8]) -> Option<UploadedFile> {
        Some(UploadedFile {
            original_name: "recibo.png".into(),
            content_type: Some("image/png".into()),
            bytes: bytes.to_vec(),
        })
    }

    #[tokio::test]
    async fn test_upload_records_pointer() {
        let (dir, db) = temp_db();
        let storage = LocalStorage::new(dir.path().join("uploads"));

        let proof = upload_proof(
            &db,
            &storage,
            Some("Ana".into()),
            Some("MB Way".into()),
            file(b"png"),
        )
        .await
        .unwrap();

        assert_eq!(proof.original_name, "recibo.png");
        assert!(proof.file_name.ends_with("-recibo.png"));

        let stored: Vec<PaymentProof> = list_records(&db, tables::PAYMENT_PROOFS).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].canal, "MB Way");
    }

    #[tokio::test]
    async fn test_upload_requires_file() {
        let (dir, db) = temp_db();
        let storage = LocalStorage::new(dir.path().join("uploads"));

        let missing = upload_proof(&db, &storage, Some("Ana".into()), None, None).await;
        assert!(matches!(missing, Err(AppError::InvalidInput(_))));

        let empty = upload_proof(&db, &storage, Some("Ana".into()), None, file(b"")).await;
        assert!(matches!(empty, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_provider_failure_writes_nothing() {
        let (_dir, db) = temp_db();

        let result = upload_proof(&db, &FailingStorage, None, None, file(b"png")).await;

        assert!(matches!(result, Err(AppError::UploadProvider(_))));
        assert_eq!(count_records(&db, tables::PAYMENT_PROOFS), 0);
    }
}
