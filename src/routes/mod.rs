pub mod admin;
pub mod api;
pub mod health;
pub mod messages;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::constants::MAX_UPLOAD_BYTES;
use crate::AppState;

pub use admin::admin_action;
pub use api::api_action;
pub use health::health_check;
pub use messages::list_messages;
pub use upload::upload_comprovativo;

/// `{"status": "success", "message": ...}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl MessageResponse {
    pub fn success(message: &'static str) -> Self {
        Self {
            status: "success",
            message,
        }
    }
}

/// `{"status": "success", "data": ...}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if config.allows_any_origin() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid allowed origin: {}", origin);
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Build the full application router
///
/// Anything that is not an API route is served from the static front-end
/// directory (`GET /` returns its index.html).
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let static_files = ServeDir::new(&state.config.static_dir);
    let log_requests = state.config.log_requests;

    let router = Router::new()
        .route("/health", get(health_check))
        .route("/api", post(api_action))
        .route("/api/messages", get(list_messages))
        .route(
            "/api/upload_comprovativo",
            post(upload_comprovativo).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/admin-api", post(admin_action))
        .fallback_service(static_files)
        .layer(cors)
        .with_state(state);

    if log_requests {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}
