use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// The review UI may be served from another origin; it only reads and posts JSON.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
