mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::{database, middleware};
use crate::features::categories::CategoryService;
use crate::features::links::{routes as links_routes, LinkService, PageState, SubmissionService};
use crate::modules::safe_browsing::{SafeBrowsingClient, UrlReputationChecker};
use crate::shared::templates::TemplateEngine;
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "Configuration loaded: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Environment override first, then the `google` table
    let api_key = match config.safe_browsing.api_key.clone() {
        Some(key) => key,
        None => database::fetch_safe_browsing_api_key(&pool)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read Safe Browsing API key: {}", e))?
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No Safe Browsing API key: set SAFE_BROWSING_API_KEY or insert a row into `google`"
                )
            })?,
    };
    let checker: Arc<dyn UrlReputationChecker> = Arc::new(
        SafeBrowsingClient::new(&config.safe_browsing, api_key)
            .map_err(|e| anyhow::anyhow!("Unable to initialize Safe Browsing client: {}", e))?,
    );
    tracing::info!(
        "Safe Browsing client initialized ({})",
        config.safe_browsing.server_url
    );

    let templates = Arc::new(
        TemplateEngine::load(&config.app.templates_dir)
            .map_err(|e| anyhow::anyhow!("Failed to load templates: {}", e))?,
    );

    let links = Arc::new(LinkService::new(pool.clone()));
    let state = PageState {
        categories: Arc::new(CategoryService::new(pool.clone())),
        submissions: Arc::new(SubmissionService::new(Arc::clone(&links), checker)),
        links,
        templates,
    };
    tracing::info!("Page services initialized");

    // Simple health check endpoint
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let app = Router::new()
        .merge(health_route)
        .merge(links_routes::routes(state, &config.app.assets_dir))
        .layer(
            ServiceBuilder::new()
                // Generate X-Request-Id using UUID v7 (or use client-provided one)
                .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::MakeSpanWithRequestId)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                // Propagate X-Request-Id to response headers
                .layer(PropagateRequestIdLayer::x_request_id()),
        );

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
