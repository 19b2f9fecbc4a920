//! The caixa web server.

use std::{fs::OpenOptions, net::SocketAddr, sync::Arc};

use axum::{
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use caixa::{AppState, build_router, graceful_shutdown, logging_middleware};

/// The web server for caixa, a personal revenue and expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The port to serve the application from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The canonical timezone string (e.g., "America/Sao_Paulo") used when
    /// deciding what "today" means for new entries.
    #[arg(long, default_value = "America/Sao_Paulo")]
    timezone: String,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let connection = Connection::open(&args.db_path).expect("Could not open the database file");
    let state = AppState::new(connection, &args.timezone)
        .expect("Could not initialize the application database");

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request| {
            let matched_path = request
                .extensions()
                .get::<MatchedPath>()
                .map(MatchedPath::as_str);

            tracing::debug_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                matched_path
            )
        })
        // 5xx responses are already logged by the error handlers.
        .on_failure(());

    let router = build_router(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(trace_layer);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let address = SocketAddr::from(([127, 0, 0, 1], args.port));
    tracing::info!("HTTP server listening on {address}");

    axum_server::bind(address)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .unwrap();
}

/// Log to stdout at the level set by `RUST_LOG` (INFO by default), and to
/// `debug.log` at DEBUG and above.
fn setup_logging() {
    let stdout_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(stdout_filter);

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");
    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}
