use axum::middleware as axum_middleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use starwars_api::config::types::Config;
use starwars_api::db::init_db_pool;
use starwars_api::db::store::Db;
use starwars_api::logging::{self, LogConfig};
use starwars_api::metrics;
use starwars_api::middleware::access_log;
use starwars_api::routes;
use starwars_api::state::app_state::AppState;

fn main() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap();

    runtime.block_on(async {
        let config = Config::from_env();

        // File + console logging; the guards must stay alive for the whole run
        let _guards = logging::init_logging(LogConfig {
            log_dir: config.log_dir.clone(),
            ..LogConfig::default()
        });

        let pool = init_db_pool(&config.database_url)
            .await
            .expect("Failed to initialize database pool");

        let app_state = Arc::new(AppState::new(Db::new(pool)));

        let app = routes::create_router(app_state)
            .layer(axum_middleware::from_fn(
                metrics::middleware::metrics_middleware,
            ))
            .layer(axum_middleware::from_fn(access_log::access_log_middleware))
            .layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr).await.unwrap();
        tracing::info!("listening on {}", addr);
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });
}
