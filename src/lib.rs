#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::routes::AppState;
#[cfg(feature = "server")]
use crate::table::live::LiveOptions;

pub mod detail;
pub mod domain;
pub mod dto;
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod services;
pub mod table;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let table = LiveOptions {
        debounce: server_config.debounce(),
        breakpoint: server_config.mobile_breakpoint,
        ..LiveOptions::default()
    };

    // Seed datasets wrapped in the configured source kind.
    let state = AppState::from_seed(
        server_config.simulate_latency,
        server_config.network_profile(),
        table,
    )
    .map_err(|e| std::io::Error::other(format!("Failed to load seed data: {e}")))?;
    let state = web::Data::new(state);

    if server_config.simulate_latency {
        let profile = server_config.network_profile();
        log::info!(
            "Simulating latency {:?}..={:?} with failure rate {}",
            profile.min_latency(),
            profile.max_latency(),
            profile.failure_rate()
        );
    }

    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid secret: {e}")))?;
    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(routes::configure)
            .app_data(web::Data::new(tera.clone()))
            .app_data(state.clone())
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
