use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{HeaderName, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::notification::resend::{Mailer, ResendClient};

pub mod email;
pub mod handlers;

/// Shared application state passed to handlers.
pub struct AppState {
    pub config: Config,
    /// `None` when RESEND_API_KEY is unset; send endpoints then answer 500.
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl AppState {
    /// Builds a Resend-backed mailer when an API key is configured.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let mailer: Option<Arc<dyn Mailer>> = match &config.resend_api_key {
            Some(key) => Some(Arc::new(ResendClient::new(
                key.clone(),
                config.resend_api_url.clone(),
            )?)),
            None => None,
        };
        Ok(Self { config, mailer })
    }

    pub fn with_mailer(config: Config, mailer: Option<Arc<dyn Mailer>>) -> Self {
        Self { config, mailer }
    }
}

/// Routes relative to `/api`.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/send-preview-packet", post(email::send_preview_packet))
        .route("/send-service-report", post(email::send_service_report))
        .route("/workflows", get(handlers::list_workflows))
        .route("/services", get(handlers::list_services))
        .route("/services/:id/events", get(handlers::list_service_events))
        .route("/services/:id/report", get(handlers::latest_service_report))
        .route("/packets/preview", post(handlers::preview_packet))
        .route("/packets/welcome", post(handlers::welcome_packet))
        .route("/field-rules", post(handlers::field_rules))
        .fallback(fallback_404)
}

/// The full application: health check, `/api` routes and middleware.
pub fn app(state: Arc<AppState>) -> Router {
    let dashboard_origin = state.config.dashboard_origin.clone();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            let origin_str = origin.to_str().unwrap_or("");
            origin_str == dashboard_origin
                || origin_str.starts_with("http://localhost:")
                || origin_str.starts_with("http://127.0.0.1:")
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("x-request-id"),
        ]);

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .nest("/api", api_router())
        .with_state(state)
        // Generated packets carry several HTML documents; 10 MB is ample
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(middleware::from_fn(security_headers_middleware))
}

async fn fallback_404() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Middleware: tags every response with a unique `x-request-id`.
async fn request_id_middleware(req: Request, next: Next) -> Response {
    let req_id = uuid::Uuid::new_v4().to_string();
    let mut resp = next.run(req).await;
    if let Ok(val) = HeaderValue::from_str(&req_id) {
        resp.headers_mut().insert("x-request-id", val);
    }
    resp
}

/// Middleware: standard security headers on every response.
async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut resp = next.run(req).await;
    let headers = resp.headers_mut();

    headers.insert("x-content-type-options", HeaderValue::from_static("nosniff"));
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert("cache-control", HeaderValue::from_static("no-store"));
    headers.insert("referrer-policy", HeaderValue::from_static("no-referrer"));
    headers.remove("server");

    resp
}
