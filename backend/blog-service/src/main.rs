use actix_web::{middleware::Logger, App, HttpServer};
use blog_service::auth::SessionManager;
use blog_service::db::MongoStore;
use blog_service::middleware::RequestTimingMiddleware;
use blog_service::{routes, AppState};
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,mongodb=warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Blog Service
///
/// HTTP backend for blog posts, comments and wishlists.
///
/// # Routes
///
/// - `/blogs`, `/words`, `/featured`, `/latest`, `/blog/{id}`, `/blogs/search` - reads
/// - `POST /blogs`, `PUT /update/blog/{id}`, `DELETE /delete/blog` - writes
/// - `/comments` - comments by blog, create
/// - `/wishlist/*` - per-user wishlist, session cookie required
/// - `/jwt`, `/logout` - session cookie issue and removal
///
/// Runs on port 5000 unless `PORT` says otherwise.
#[actix_web::main]
async fn main() -> io::Result<()> {
    // A missing .env is normal outside local development
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = match blog_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);
    tracing::debug!(?config, "Loaded configuration");

    let store = match MongoStore::connect(&config.database).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("MongoDB connection failed: {:#}", e);
            eprintln!("ERROR: Failed to connect to MongoDB: {}", e);
            std::process::exit(1);
        }
    };

    let sessions = Arc::new(SessionManager::new(&config.session));
    let state = AppState::from_mongo(store.clone(), sessions);

    let bind_address = config.bind_address();
    let cors_config = config.cors.clone();
    tracing::info!("Starting HTTP server at {}", bind_address);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(RequestTimingMiddleware)
            .wrap(routes::cors(&cors_config))
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(|cfg| routes::configure(cfg, &state))
    })
    .disable_signals();
    if let Some(workers) = config.app.workers {
        server = server.workers(workers);
    }
    let server = server.bind(&bind_address)?.run();
    let server_handle = server.handle();

    let server_task = tokio::spawn(server);

    tokio::select! {
        result = server_task => {
            match result {
                Ok(Ok(())) => tracing::info!("HTTP server stopped"),
                Ok(Err(e)) => {
                    tracing::error!("HTTP server error: {}", e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::error!("HTTP server task failed: {}", e);
                    return Err(io::Error::other(e));
                }
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
        }
    }

    tracing::info!("Blog-service shutting down");

    MongoStore::clone(&store).shutdown().await;

    Ok(())
}
