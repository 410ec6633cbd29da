pub use crate::common::RouteResult;

use std::sync::Arc;

use axum::{extract::FromRef, routing::get_service, Router};
use journey::{cache::ResolutionCache, Resolver};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};

pub mod api;
pub mod common;
pub mod config;

pub use config::WebConfig;

#[derive(Clone, FromRef)]
pub struct WebState {
    /// Shared by all requests for the lifetime of the server.
    pub resolution_cache: Arc<ResolutionCache>,
}

impl WebState {
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self {
            resolution_cache: Arc::new(ResolutionCache::new(resolver)),
        }
    }
}

pub fn router(state: WebState, config: &WebConfig) -> Router {
    Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(static_content_router(config))
        .layer(CorsLayer::permissive())
}

pub async fn start_web_server(state: WebState, config: WebConfig) -> std::io::Result<()> {
    let routes = router(state, &config);

    let listener = TcpListener::bind(&config.bind_address).await?;
    log::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}

fn static_content_router(config: &WebConfig) -> Router {
    Router::new().nest_service(
        "/",
        get_service(
            ServeDir::new(&config.static_dir)
                .not_found_service(ServeFile::new(config.static_dir.join("error404.html"))),
        ),
    )
}
