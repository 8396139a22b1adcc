//! # verdantd — verdant daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct the bus mirror (or a no-op stand-in when MQTT is disabled)
//!   and run the startup resync
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing_subscriber::EnvFilter;

use verdant_adapter_http_axum::state::AppState;
use verdant_adapter_mqtt::MqttPublisher;
use verdant_adapter_storage_sqlite_sqlx::{
    SqliteFarmRepository, SqliteFloorRepository, SqliteHarvestRepository, SqlitePlantRepository,
    SqlitePotRepository,
};
use verdant_app::mirror::MirrorService;
use verdant_app::ports::{Mirror, NoopMirror};

use self::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let db = verdant_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    if config.mqtt.enabled {
        let publisher = MqttPublisher::connect(&config.mqtt);
        let mirror = Arc::new(MirrorService::new(
            SqliteFarmRepository::new(pool.clone()),
            SqlitePlantRepository::new(pool.clone()),
            publisher,
            config.mqtt.discovery_prefix.clone(),
        ));

        // Repopulate the bus from the store before accepting traffic. A
        // failure leaves the bus stale, not the server down.
        match mirror.resync_all().await {
            Ok(summary) => tracing::info!(
                farms = summary.farms,
                plants = summary.plants,
                failures = summary.failures,
                "startup resync complete"
            ),
            Err(err) => tracing::warn!(error = %err, "startup resync failed"),
        }

        serve(&config, pool, mirror).await
    } else {
        tracing::info!("mqtt disabled, running without bus mirror");
        serve(&config, pool, Arc::new(NoopMirror)).await
    }
}

async fn serve<M: Mirror + 'static>(
    config: &Config,
    pool: SqlitePool,
    mirror: Arc<M>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(
        SqliteFarmRepository::new(pool.clone()),
        SqliteFloorRepository::new(pool.clone()),
        SqlitePotRepository::new(pool.clone()),
        SqlitePlantRepository::new(pool.clone()),
        SqliteHarvestRepository::new(pool),
        mirror,
    );
    let app = verdant_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(%bind_addr, "verdantd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
