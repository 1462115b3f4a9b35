//! API routes and handlers.

use crate::config::ServerConfig;
use crate::error::{ApiError, ServerError};
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{Method, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use notary_certify::{CERTIFICATE_FILE_NAME, CertificationRecord, Certifier, export};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Multipart part carrying the file
pub const FILE_FIELD: &str = "file";
/// Multipart part carrying the owner label
pub const OWNER_FIELD: &str = "owner";
/// Multipart part carrying the original SHA-256 digest
pub const DIGEST_FIELD: &str = "originalDigest";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    certifier: Arc<Certifier>,
}

impl AppState {
    /// Create state from configuration
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            certifier: Arc::new(Certifier::new(config.certifier.clone())),
        }
    }
}

/// Build the API router
///
/// # Errors
///
/// Returns [`ServerError::InvalidOrigin`] if the configured CORS origin is invalid
pub fn router(config: &ServerConfig) -> Result<Router, ServerError> {
    let mut router = Router::new()
        .route("/", get(home))
        .route("/api/certify", post(certify))
        .route("/api/verify", post(verify))
        .route("/api/certificate", post(save_certificate))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(config));

    if let Some(origin) = config.cors_origin()? {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::exact(origin))
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        );
    }

    Ok(router)
}

/// Bind and serve until Ctrl-C
///
/// # Errors
///
/// Returns error if the router cannot be built, the address cannot be bound,
/// or the server fails
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let app = router(&config)?;
    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind.clone(),
            source,
        })?;

    tracing::info!(addr = %config.bind, "notary server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
    }
}

async fn home() -> Json<Value> {
    Json(json!({
        "message": "File certifier - NOTARY backend",
        "status": "ok",
    }))
}

#[derive(Default)]
struct Upload {
    file_name: Option<String>,
    data: Option<Bytes>,
    fields: HashMap<String, String>,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    let mut upload = Upload::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == FILE_FIELD {
            upload.file_name = field.file_name().map(str::to_string);
            upload.data = Some(field.bytes().await?);
        } else {
            let text = field.text().await?;
            upload.fields.insert(name, text);
        }
    }
    Ok(upload)
}

async fn certify(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let upload = read_upload(multipart).await?;
    let data = upload.data.ok_or(ApiError::MissingFile)?;
    let file_name = upload
        .file_name
        .filter(|name| !name.is_empty())
        .ok_or(ApiError::UnnamedFile)?;
    let owner = upload.fields.get(OWNER_FIELD).cloned();

    let certifier = Arc::clone(&state.certifier);
    let record = tokio::task::spawn_blocking(move || {
        certifier.certify(&data, &file_name, owner.as_deref())
    })
    .await?;

    Ok(Json(json!({
        "success": true,
        "certification": record,
    })))
}

async fn verify(multipart: Multipart) -> Result<Json<Value>, ApiError> {
    let upload = read_upload(multipart).await?;
    let data = upload.data.ok_or(ApiError::MissingFile)?;
    let original = upload
        .fields
        .get(DIGEST_FIELD)
        .map(|digest| digest.trim().to_string())
        .filter(|digest| !digest.is_empty())
        .ok_or(ApiError::MissingDigest)?;

    let record =
        tokio::task::spawn_blocking(move || notary_certify::verify(&data, &original)).await??;

    Ok(Json(json!({
        "success": true,
        "verification": record,
    })))
}

#[derive(Deserialize)]
struct SaveRequest {
    certification: CertificationRecord,
}

async fn save_certificate(body: Bytes) -> Result<Response, ApiError> {
    let request: SaveRequest =
        serde_json::from_slice(&body).map_err(ApiError::InvalidCertificate)?;
    let bytes = export(&request.certification)?;

    let headers = [
        (header::CONTENT_TYPE, "application/json".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", CERTIFICATE_FILE_NAME),
        ),
    ];
    Ok((headers, bytes).into_response())
}
