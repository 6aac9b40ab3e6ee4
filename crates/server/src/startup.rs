use std::{env, io, net::SocketAddr};

use axum::Router;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use service::vehicle::MongoVehicleRepository;

use crate::routes;
use crate::state::AppState;

/// Initialize tracing with sensible defaults and a stdout writer.
/// Respects `RUST_LOG` if set.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Resolve the bind address from config, allowing env-var overrides.
fn load_bind_addr(cfg: &configs::ServerConfig) -> anyhow::Result<SocketAddr> {
    let host = env::var("SERVER_HOST").unwrap_or_else(|_| cfg.host.clone());
    let port = env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(cfg.port);
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: wire up storage, build the app and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = configs::AppConfig::load_and_validate()?;

    let client = models::db::connect(&cfg.database).await?;
    let repo = MongoVehicleRepository::new(&client, &cfg.database.database, &cfg.database.collection);
    // The VIN uniqueness invariant depends on this index; creation
    // failure aborts startup.
    repo.ensure_vin_index().await?;
    info!(
        database = %cfg.database.database,
        collection = %cfg.database.collection,
        "vin index ensured"
    );

    let state = AppState::new(repo);
    let app: Router = routes::build_router(state);

    let addr = load_bind_addr(&cfg.server)?;
    info!(%addr, "starting vehicle inventory server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
