use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{
    config::AppConfig,
    database,
    error::{AppError, Result},
    routes,
    store::{PgProductStore, ProductStore},
    utils::extractors::REQUEST_ID_HEADER,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let pool = database::create_pool(&config.database).await?;
    router(Arc::new(PgProductStore::new(pool)), config)
}

/// Assembles the HTTP surface around any gateway implementation.
pub fn router(store: Arc<dyn ProductStore>, config: &AppConfig) -> Result<Router> {
    let state = AppState { store };

    let allowed_origins = if config.cors.allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins = config
            .cors
            .allowed_origins
            .iter()
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|_| {
                    AppError::ConfigError(format!("Invalid CORS origin: {}", origin))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            http::header::CONTENT_TYPE,
            http::header::HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([http::header::LOCATION])
        .allow_origin(allowed_origins);

    let app = routes::create_router()
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(cors)
        .with_state(state);

    Ok(app)
}
