//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tally_common::{AppConfig, AppError, JwtService, SearchBackend};
use tally_core::SearchIndex;
use tally_db::{create_pool, run_migrations, DatabaseConfig};
use tally_search::{InMemorySearchIndex, RedisPool, RedisSearchIndex, SearchIndexer, SharedRedisPool};
use tally_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health probes are merged outside the rate-limited API stack.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );

    health_routes().merge(api).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
    info!("Database migrations applied");

    let (index, redis_pool) = create_search_index(&config)?;

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    let mut builder = ServiceContextBuilder::new()
        .pool(pool)
        .search_indexer(SearchIndexer::new(index))
        .jwt_service(jwt_service);
    if let Some(redis_pool) = redis_pool {
        builder = builder.redis_pool(redis_pool);
    }
    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Pick the search backend named in the configuration
fn create_search_index(
    config: &AppConfig,
) -> Result<(Arc<dyn SearchIndex>, Option<SharedRedisPool>), AppError> {
    match config.search.backend {
        SearchBackend::Redis => {
            info!(queue = %config.search.queue_key, "Using Redis search queue");
            let redis_pool = RedisPool::from_config(&config.redis)
                .map_err(|e| AppError::Search(e.to_string()))?;
            let index: Arc<dyn SearchIndex> = Arc::new(RedisSearchIndex::new(
                redis_pool.clone(),
                config.search.queue_key.clone(),
            ));
            Ok((index, Some(Arc::new(redis_pool))))
        }
        SearchBackend::Memory => {
            info!("Using in-memory search index");
            let index: Arc<dyn SearchIndex> = Arc::new(InMemorySearchIndex::new());
            Ok((index, None))
        }
    }
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
