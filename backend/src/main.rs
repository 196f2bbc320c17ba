//! Storefront entry-point: loads configuration, prepares the store, and runs
//! the HTTP server.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{
    AppConfig, Repositories, ServerConfig, ServiceSettings, StoreBackend, Wiring, build_wiring,
    create_server,
};
use storefront::domain::{DemoDataSeeder, Email, SeedAdmin, Username};
use storefront::inbound::http::health::HealthState;
use storefront::inbound::http::session_config::fingerprint::key_fingerprint;
use storefront::inbound::http::session_config::{BuildMode, session_settings_from_env};
use storefront::outbound::memory::InMemoryStore;
use storefront::outbound::persistence::{DbPool, PoolConfig, run_migrations};

const SEED_ADMIN_USERNAME: &str = "admin";
const SEED_ADMIN_PASSWORD: &str = "admin123";

fn io_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

async fn open_store(config: &AppConfig) -> std::io::Result<StoreBackend> {
    let Some(url) = config.database_url.as_deref() else {
        warn!("no database configured; data lives in memory and is lost on restart");
        return Ok(StoreBackend::Memory(Arc::new(InMemoryStore::new())));
    };
    run_migrations(url).await.map_err(io_error)?;
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(config.db_max_connections()))
        .await
        .map_err(io_error)?;
    info!(max_connections = config.db_max_connections(), "database pool ready");
    Ok(StoreBackend::Postgres(pool))
}

async fn seed_demo_data(seeder: &DemoDataSeeder, admin_email: Email) -> std::io::Result<()> {
    let admin = SeedAdmin {
        email: admin_email,
        username: Username::parse(SEED_ADMIN_USERNAME).map_err(io_error)?,
        password: SEED_ADMIN_PASSWORD.to_owned(),
    };
    let outcome = seeder.seed(&admin).await.map_err(io_error)?;
    info!(?outcome, "demo data seeding finished");
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::load().map_err(io_error)?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io_error)?;
    info!(
        key_fingerprint = %key_fingerprint(&session.key),
        cookie_secure = session.cookie_secure,
        "session settings loaded"
    );
    let bind_addr = config.bind_addr().map_err(io_error)?;

    let backend = open_store(&config).await?;
    let settings = ServiceSettings {
        admin_email: config.admin_email().map_err(io_error)?,
        contact_inbox: config.contact_inbox().map_err(io_error)?,
        mail_relay: config.mail_relay_url().map_err(io_error)?,
        mail_from: config.mail_from().to_owned(),
    };
    let Wiring { http_state, seeder } =
        build_wiring(&Repositories::from_backend(&backend), &settings)?;

    if config.seed_demo_data {
        seed_demo_data(&seeder, settings.admin_email.clone()).await?;
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        http_state,
        ServerConfig::new(session, bind_addr),
    )?;
    info!(%bind_addr, "storefront listening");
    server.await
}
