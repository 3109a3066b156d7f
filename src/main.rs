use std::env;
use std::path::Path;

use dotenvy::dotenv;
use yuna_dashboard::models::config::load_server_config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let server_config = match load_server_config(Path::new("config"), &app_env) {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {}", err);
            std::process::exit(1);
        }
    };

    yuna_dashboard::run(server_config).await
}
