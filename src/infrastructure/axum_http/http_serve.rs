use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::config::config_model::DotEnvyConfig;
use crate::infrastructure::axum_http::{default_routers, routers};
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::razorpay::razorpay_client::RazorpayClient;
use crate::otp::{InMemoryOtpCache, OtpStore, spawn_sweeper};

pub async fn start(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Result<()> {
    let otp_store = Arc::new(OtpStore::new(InMemoryOtpCache::new()));
    spawn_sweeper(Arc::clone(&otp_store));

    let razorpay = config
        .razorpay
        .as_ref()
        .map(|keys| Arc::new(RazorpayClient::new(keys.key_id.clone(), keys.key_secret.clone())));

    let app = Router::new()
        .fallback(default_routers::not_found)
        .nest(
            "/api/auth",
            routers::auth::routes(Arc::clone(&db_pool), &config, otp_store),
        )
        .nest("/api/orders", routers::orders::routes(Arc::clone(&db_pool)))
        .nest(
            "/api/payment",
            routers::payments::routes(Arc::clone(&db_pool), razorpay),
        )
        .nest("/api/admin", routers::admin::routes(Arc::clone(&db_pool)))
        .nest("/api/events", routers::events::routes(Arc::clone(&db_pool)))
        .nest("/api/contact", routers::contact::routes())
        .route("/api/health", get(default_routers::health_check))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.timeout,
        )))
        .layer(RequestBodyLimitLayer::new(
            (config.server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::PUT,
                    Method::DELETE,
                ])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_origin(Any), // TODO Add the domain later
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
    };

    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
