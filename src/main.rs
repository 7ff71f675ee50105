use axum::http::{self, HeaderValue, Method};
use dotenvy::dotenv;
use env_logger::{Builder, Env};
use log::LevelFilter;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use murderer_server::{app, models::config::ServerConfig};

// Log settings; RUST_LOG overrides the default level.
fn init_logger() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("tower_http", LevelFilter::Debug)
        .filter_module("axum", LevelFilter::Info)
        .format_timestamp(Some(env_logger::TimestampPrecision::Millis))
        .format_target(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_loaded = dotenv();
    init_logger();
    if let Err(e) = env_loaded {
        log::warn!("no .env file loaded: {}", e);
    }

    let config = ServerConfig::from_env();
    if config.notify.enabled {
        log::info!("roster snapshots go to udp://{}", config.notify.target());
    } else {
        log::info!("roster snapshots disabled");
    }

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([http::header::CONTENT_TYPE]);

    let app = app::create_app(&config).layer(cors).layer(
        TraceLayer::new_for_http().make_span_with(|request: &http::Request<_>| {
            tracing::info_span!(
                "HTTP request",
                method = %request.method(),
                uri = %request.uri(),
            )
        }),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    log::info!("server listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
