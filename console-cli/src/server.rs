//! Web Server for the console UI
//!
//! Serves the compiled browser console, either embedded in the binary or
//! from a directory on disk, with SPA fallback to `index.html`.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use rust_embed::RustEmbed;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Embedded UI assets (compiled WASM app)
#[derive(RustEmbed)]
#[folder = "../ui/dist/"]
#[allow_missing = true]
struct UiAssets;

const BUNDLE_MISSING: &str =
    "The console UI was not built into this binary. Run `trunk build --release` in ui/ and rebuild, or pass --dist.";

/// Where the UI files come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Embedded,
    Directory(PathBuf),
}

/// Build the UI router
pub fn build_router(source: &AssetSource) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new().route("/health", get(health_check));

    let router = match source {
        AssetSource::Embedded => router
            .route("/", get(serve_index))
            .fallback(serve_static),
        AssetSource::Directory(dir) => {
            let index = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).fallback(index))
        }
    };

    router.layer(TraceLayer::new_for_http()).layer(cors)
}

/// Bind and serve in the background; returns the bound address
pub async fn start_server(
    port: u16,
    source: AssetSource,
) -> anyhow::Result<(SocketAddr, tokio::task::JoinHandle<anyhow::Result<()>>)> {
    let app = build_router(&source);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    let addr = listener.local_addr()?;

    match &source {
        AssetSource::Embedded => info!("Serving embedded UI on {}", addr),
        AssetSource::Directory(dir) => info!("Serving UI from {} on {}", dir.display(), addr),
    }

    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .map_err(|e| anyhow::anyhow!("Server error: {}", e))
    });

    Ok((addr, handle))
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    tracing::debug!("Health check endpoint called");
    (StatusCode::OK, "OK")
}

async fn serve_index() -> Response {
    match embedded_file("index.html") {
        Some(response) => response,
        None => (StatusCode::SERVICE_UNAVAILABLE, BUNDLE_MISSING).into_response(),
    }
}

/// Serve static files from embedded assets (fallback handler)
async fn serve_static(req: Request<Body>) -> Response {
    let path = req.uri().path().trim_start_matches('/');
    tracing::debug!("Fallback handler called for path: {}", path);

    if let Some(response) = embedded_file(path) {
        return response;
    }

    // Client-side routes such as /channels get the app shell
    if !path.contains('.') {
        return serve_index().await;
    }

    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

fn embedded_file(path: &str) -> Option<Response> {
    UiAssets::get(path).map(|content| {
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();

        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime)],
            Body::from(content.data.into_owned()),
        )
            .into_response()
    })
}
