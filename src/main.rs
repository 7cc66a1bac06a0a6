mod config;
mod database;
mod error;
mod models;
mod routes;
mod server;
mod services;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = match Config::load(&Config::config_path()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("initializing state...");
    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            log::error!("failed to initialize: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server::serve(state).await {
        log::error!("server error: {}", e);
        std::process::exit(1);
    }
}
