//! HTTP surface for the deck service.
//!
//! Routes:
//! - `GET  /api/cards`: the catalog
//! - `GET  /api/generate`: random balanced deck
//! - `POST /api/generate/custom`: complete a partial deck
//! - `POST /api/validate`: validate a deck as-is
//! - `POST /api/analyze`: model feedback on a deck

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::cards::{Card, CardRef};
use crate::error::{DeckError, Result};
use crate::service::{AnalysisRequest, AnalysisResponse, DeckService};

/// Listener and CORS settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Frontend origin allowed by CORS. `None` allows any origin.
    pub allowed_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            allowed_origin: Some("http://localhost:3000".to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomDeckRequest {
    #[serde(default)]
    selected_cards: Vec<CardRef>,
}

#[derive(Debug, Default, Deserialize)]
struct ValidateRequest {
    #[serde(default)]
    deck: Vec<CardRef>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for DeckError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            DeckError::Request(_) => (StatusCode::BAD_REQUEST, "Invalid request"),
            DeckError::Generation { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Could not generate a valid deck")
            }
            DeckError::Config(_) | DeckError::ExternalService(_) | DeckError::Io(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };
        if status.is_server_error() {
            log::error!("{error}: {self}");
        } else {
            log::warn!("{error}: {self}");
        }
        (
            status,
            Json(ErrorBody {
                error,
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Wrap a body with headers that keep browsers from caching deck images.
fn no_cache<T: Serialize>(body: T) -> impl IntoResponse {
    (
        [
            (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        Json(body),
    )
}

async fn list_cards(State(service): State<Arc<DeckService>>) -> Json<Vec<Card>> {
    Json(service.catalog().all().to_vec())
}

async fn generate_deck(State(service): State<Arc<DeckService>>) -> Result<impl IntoResponse> {
    Ok(no_cache(service.generate()?))
}

/// Unpack a JSON body, turning extractor rejections into request errors.
fn body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(request)| request)
        .map_err(|rejection| DeckError::Request(rejection.body_text()))
}

async fn generate_custom_deck(
    State(service): State<Arc<DeckService>>,
    payload: std::result::Result<Json<CustomDeckRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let request = body(payload)?;
    Ok(no_cache(service.complete(&request.selected_cards)?))
}

async fn validate_deck(
    State(service): State<Arc<DeckService>>,
    payload: std::result::Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let request = body(payload)?;
    Ok(no_cache(service.validate(&request.deck)?))
}

async fn analyze_deck(
    State(service): State<Arc<DeckService>>,
    payload: std::result::Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    let response = match body(payload) {
        Ok(request) => service.analyze(request).await,
        Err(error) => {
            log::warn!("Rejected analysis request: {error}");
            AnalysisResponse::failure(&error)
        }
    };
    let status = if response.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, no_cache(response)).into_response()
}

/// CORS layer for the configured frontend origin.
pub fn cors_layer(allowed_origin: Option<&str>) -> Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match allowed_origin {
        Some(origin) => {
            let origin = HeaderValue::from_str(origin)
                .map_err(|e| DeckError::Config(format!("invalid CORS origin {origin}: {e}")))?;
            Ok(layer.allow_origin(origin))
        }
        None => Ok(layer.allow_origin(Any)),
    }
}

/// Build the API router.
pub fn router(service: Arc<DeckService>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/api/cards", get(list_cards))
        .route("/api/generate", get(generate_deck))
        .route("/api/generate/custom", post(generate_custom_deck))
        .route("/api/validate", post(validate_deck))
        .route("/api/analyze", post(analyze_deck))
        .layer(cors)
        .with_state(service)
}

/// Bind and serve until the process is stopped.
pub async fn serve(service: Arc<DeckService>, config: &ServerConfig) -> Result<()> {
    let app = router(service, cors_layer(config.allowed_origin.as_deref())?);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| DeckError::Config(format!("invalid listen address: {e}")))?;
    let listener = TcpListener::bind(addr).await?;

    log::info!("Deck API listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
