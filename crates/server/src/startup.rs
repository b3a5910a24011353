use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::address::{repository::JsonAddressRepository, service::AddressService};

use crate::routes::{self, AppState};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load the application config once, validated. A missing config file falls
/// back to env vars and defaults; a present but invalid file is an error
/// rather than a silent fallback.
fn load_config() -> anyhow::Result<AppConfig> {
    let mut cfg = match configs::load_default() {
        Ok(cfg) => cfg,
        Err(_) => {
            let mut cfg = AppConfig::default();
            if let Ok(host) = env::var("SERVER_HOST") {
                cfg.server.host = host;
            }
            if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
                cfg.server.port = port;
            }
            if let Ok(path) = env::var("ADDRESSES_FILE") {
                cfg.storage.data_file = path;
            }
            cfg
        }
    };
    cfg.normalize_and_validate()?;
    Ok(cfg)
}

/// Public entry: wire the layers and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config()?;

    // Repository over a JSON file; the only stateful component.
    let repo = JsonAddressRepository::new(cfg.storage.data_file.clone()).await?;
    let state = AppState {
        addresses: Arc::new(AddressService::new(repo)),
    };

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(state, cors);

    // Bind and serve
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, data_file = %cfg.storage.data_file, "starting address book server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    // CONFIG_PATH is process-global, so every scenario lives in one test.
    #[test]
    fn load_config_validates_file_values() {
        let dir = std::env::temp_dir().join(format!("addressbook_cfg_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("config.toml");
        std::env::set_var("CONFIG_PATH", path.to_str().expect("utf8 path"));

        // invalid port is rejected, not silently defaulted
        std::fs::write(&path, "[server]\nhost = \"127.0.0.1\"\nport = 0\n").expect("write");
        assert!(load_config().is_err());

        // empty data_file is rejected too (no ADDRESSES_FILE set here)
        std::env::remove_var("ADDRESSES_FILE");
        std::fs::write(
            &path,
            "[server]\nhost = \"127.0.0.1\"\nport = 9090\n\n[storage]\ndata_file = \"\"\n",
        )
        .expect("write");
        assert!(load_config().is_err());

        // a valid file passes through normalized
        std::fs::write(
            &path,
            "[server]\nhost = \"127.0.0.1\"\nport = 9090\n\n[storage]\ndata_file = \"data/t.json\"\n",
        )
        .expect("write");
        let cfg = load_config().expect("valid config");
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.storage.data_file, "data/t.json");

        std::env::remove_var("CONFIG_PATH");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
