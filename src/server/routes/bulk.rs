//! Bulk hospital upload endpoints

use crate::core::batch::BatchProgress;
use crate::server::state::AppState;
use crate::utils::error::BulkError;
use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result as ActixResult, web};
use futures::StreamExt;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Content types accepted for the uploaded file part
pub const ACCEPTED_CONTENT_TYPES: &[&str] = &["text/csv", "application/csv", "application/vnd.ms-excel"];

/// Configure bulk upload routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/hospitals/bulk")
            .route("", web::post().to(upload_bulk_hospitals))
            .route("/{batch_id}", web::get().to(get_bulk_batch_status))
            .route("/{batch_id}/resume", web::post().to(resume_bulk_batch))
            .route("/{batch_id}/activate", web::post().to(retry_batch_activation)),
    );
}

/// Upload a CSV of hospitals and process it as one batch
pub async fn upload_bulk_hospitals(
    state: web::Data<AppState>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let max_size = state.config.server().max_body_size;
    let contents = read_csv_field(payload, max_size).await?;
    info!(bytes = contents.len(), "Bulk upload received");

    match state.processor.process_upload(&contents).await {
        Ok(result) => Ok(HttpResponse::Ok().json(result)),
        Err(e) => Err(reject("processing hospital bulk upload", None, e)),
    }
}

/// Report progress of a tracked batch
pub async fn get_bulk_batch_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let batch_id = parse_batch_id(&path)?;
    let store = state
        .processor
        .store()
        .ok_or_else(|| reject("reading batch status", Some(batch_id), BulkError::StateUnavailable))?;

    match store.get_snapshot(batch_id).await {
        Some(snapshot) => Ok(HttpResponse::Ok().json(BatchProgress::from(snapshot))),
        None => Err(BulkError::BatchNotFound(batch_id).into()),
    }
}

/// Resubmit the failed rows of a batch
pub async fn resume_bulk_batch(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let batch_id = parse_batch_id(&path)?;

    match state.processor.resume(batch_id).await {
        Ok(result) => Ok(HttpResponse::Ok().json(result)),
        Err(e) => Err(reject("resuming hospital bulk batch", Some(batch_id), e)),
    }
}

/// Retry activation of a batch whose rows all succeeded
pub async fn retry_batch_activation(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let batch_id = parse_batch_id(&path)?;

    match state.processor.retry_activation(batch_id).await {
        Ok(result) => Ok(HttpResponse::Ok().json(result)),
        Err(e) => Err(reject("retrying batch activation", Some(batch_id), e)),
    }
}

fn parse_batch_id(raw: &str) -> Result<Uuid, BulkError> {
    Uuid::parse_str(raw).map_err(|_| BulkError::bad_request(format!("Invalid batch id: {}", raw)))
}

/// Log service-side failures and turn the error into a response
fn reject(context: &str, batch_id: Option<Uuid>, err: BulkError) -> actix_web::Error {
    if !err.is_client_error() {
        match batch_id {
            Some(batch_id) => error!(batch_id = %batch_id, error = %err, "Unhandled error while {}", context),
            None => error!(error = %err, "Unhandled error while {}", context),
        }
    }
    err.into()
}

/// Pull the `file` part out of a multipart upload
async fn read_csv_field(mut payload: Multipart, max_size: usize) -> Result<Vec<u8>, BulkError> {
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| BulkError::bad_request(format!("Invalid multipart data: {}", e)))?;

        if field.name() != Some("file") {
            while field.next().await.is_some() {}
            continue;
        }

        if let Some(content_type) = field.content_type() {
            let essence = content_type.essence_str().to_ascii_lowercase();
            if !ACCEPTED_CONTENT_TYPES.contains(&essence.as_str()) {
                warn!(content_type = %content_type, "Rejected upload content type");
                return Err(BulkError::bad_request(format!(
                    "Unsupported content type: {}",
                    content_type
                )));
            }
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let bytes =
                chunk.map_err(|e| BulkError::bad_request(format!("Error reading file: {}", e)))?;
            if data.len() + bytes.len() > max_size {
                return Err(BulkError::bad_request(format!(
                    "Uploaded file exceeds {} bytes",
                    max_size
                )));
            }
            data.extend_from_slice(&bytes);
        }
        file_data = Some(data);
    }

    file_data.ok_or_else(|| BulkError::bad_request("No CSV file provided"))
}
