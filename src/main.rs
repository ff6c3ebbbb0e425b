mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::attachments::{
    routes as attachments_routes, AttachmentService, PgAttachmentRepository,
};
use crate::features::auth;
use crate::features::auth::routes as auth_routes;
use crate::features::collections::{
    routes as collections_routes, CollectionService, PgCollectionRepository,
};
use crate::features::health::routes as health_routes;
use crate::features::items::{routes as items_routes, ItemService, PgItemRepository};
use crate::features::rooms::{routes as rooms_routes, PgRoomRepository, RoomService};
use crate::features::stacks::{routes as stacks_routes, PgStackRepository, StackService};
use crate::features::tags::{routes as tags_routes, PgTagRepository, TagService};
use crate::modules::storage::S3BlobStore;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

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
        .max_blocking_threads(worker_threads * 4)
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
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Resolve issuer and signing keys from the identity provider
    let discovery = auth::OidcDiscovery::fetch(&config.auth.discovery_url)
        .await
        .map_err(|e| anyhow::anyhow!("OIDC discovery failed: {}", e))?;
    tracing::info!(
        "OIDC discovery complete: issuer={}, jwks_uri={}",
        discovery.issuer,
        discovery.jwks_uri
    );

    let jwks_client = Arc::new(auth::JwksClient::new(
        &discovery.jwks_uri,
        config.auth.jwks_cache_ttl,
    ));
    let jwt_validator = Arc::new(auth::JwtValidator::new(
        jwks_client,
        discovery.issuer,
        config.auth.audience.clone(),
        config.auth.jwt_leeway,
    ));
    if config.auth.audience.is_none() {
        tracing::warn!("OIDC_AUDIENCE not set; token audience will not be checked");
    }

    let blob_store = Arc::new(
        S3BlobStore::new(config.s3.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize S3 client: {}", e))?,
    );
    blob_store
        .ensure_bucket_exists()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to ensure S3 bucket exists: {}", e))?;
    tracing::info!(
        "Object store initialized for bucket: {}",
        blob_store.bucket_name()
    );

    let item_repository = Arc::new(PgItemRepository::new(pool.clone()));
    let attachment_repository = Arc::new(PgAttachmentRepository::new(pool.clone()));
    let tag_repository = Arc::new(PgTagRepository::new(pool.clone()));

    let collection_service = Arc::new(CollectionService::new(Arc::new(
        PgCollectionRepository::new(pool.clone()),
    )));
    let room_service = Arc::new(RoomService::new(Arc::new(PgRoomRepository::new(
        pool.clone(),
    ))));
    let stack_service = Arc::new(StackService::new(Arc::new(PgStackRepository::new(
        pool.clone(),
    ))));
    let tag_service = Arc::new(TagService::new(tag_repository.clone()));
    let item_service = Arc::new(ItemService::new(
        item_repository.clone(),
        tag_repository,
    ));
    let attachment_service = Arc::new(AttachmentService::new(
        item_repository,
        attachment_repository,
        blob_store,
        config.attachments.clone(),
    ));
    tracing::info!(
        "Attachment service initialized (hash chunk size: {} bytes)",
        config.attachments.hash_chunk_size
    );

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require JWT authentication)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes())
        .merge(items_routes::routes(item_service))
        .merge(collections_routes::routes(collection_service))
        .merge(rooms_routes::routes(room_service))
        .merge(stacks_routes::routes(stack_service))
        .merge(tags_routes::routes(tag_service))
        .merge(attachments_routes::routes(
            attachment_service,
            config.attachments.max_upload_size,
        ))
        .route_layer(axum::middleware::from_fn_with_state(
            jwt_validator.clone(),
            middleware::auth_middleware,
        ));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(health_routes::routes(pool))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
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
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
