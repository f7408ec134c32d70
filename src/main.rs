use tracing_subscriber::EnvFilter;

use clinicdesk::api::{api_router, ApiContext};
use clinicdesk::config::{self, ClinicConfig};
use clinicdesk::db;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("clinicdesk starting v{}", config::APP_VERSION);

    let clinic_config = ClinicConfig::from_env();

    if let Some(parent) = clinic_config.db_path.parent() {
        if let Err(err) = std::fs::create_dir_all(parent) {
            tracing::error!(%err, path = %parent.display(), "cannot create data directory");
            std::process::exit(1);
        }
    }

    // Open once at startup to run migrations and seed the clinic account;
    // request handlers open their own connections afterwards.
    match db::open_database(&clinic_config.db_path) {
        Ok(conn) => {
            if clinic_config.has_seed_account() {
                match db::clinics::ensure_clinic(&conn, &clinic_config) {
                    Ok(true) => {
                        tracing::info!(clinic_id = %clinic_config.clinic_id, "clinic created")
                    }
                    Ok(false) => {
                        tracing::info!(clinic_id = %clinic_config.clinic_id, "clinic already exists")
                    }
                    Err(err) => tracing::error!(%err, "error creating clinic during initialization"),
                }
            } else {
                tracing::warn!(
                    "CLINIC_ID/CLINIC_USERNAME/CLINIC_PASSWORD not fully set; skipping clinic seed"
                );
            }
        }
        Err(err) => {
            tracing::error!(%err, "store unavailable at startup");
            std::process::exit(1);
        }
    }

    let addr = clinic_config.bind_addr();
    let ctx = ApiContext::new(clinic_config);
    let app = api_router(ctx);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%err, %addr, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, "clinicdesk listening");

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(%err, "server error");
    }
}
