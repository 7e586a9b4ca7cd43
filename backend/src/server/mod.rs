//! Server construction and adapter wiring.

mod config;

pub use config::AppSettings;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::persistence::{
    DbPool, DieselEventRepository, DieselIdeaRepository, DieselNotificationRepository,
    DieselTodoRepository, DieselUserRepository,
};
use backend::outbound::security::{Argon2CredentialHasher, DieselTokenIssuer};
use backend::outbound::storage::LocalAttachmentStore;
use backend::Trace;
#[cfg(debug_assertions)]
use backend::ApiDoc;

/// Everything `create_server` needs that the settings layer resolved.
pub struct ServerConfig {
    /// Socket address to bind.
    pub bind_addr: SocketAddr,
    /// Shared database pool.
    pub db_pool: DbPool,
    /// Directory receiving idea attachments.
    pub upload_dir: PathBuf,
    /// Bearer-token lifetime in minutes.
    pub token_ttl_minutes: i64,
}

/// Wire the Diesel adapters into the HTTP state bundle.
///
/// # Errors
/// Propagates [`std::io::Error`] when the uploads directory cannot be opened.
pub fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let attachments = LocalAttachmentStore::open(&config.upload_dir, "uploads")?;
    Ok(HttpState::new(HttpStatePorts {
        users: Arc::new(DieselUserRepository::new(config.db_pool.clone())),
        ideas: Arc::new(DieselIdeaRepository::new(config.db_pool.clone())),
        todos: Arc::new(DieselTodoRepository::new(config.db_pool.clone())),
        events: Arc::new(DieselEventRepository::new(config.db_pool.clone())),
        notifications: Arc::new(DieselNotificationRepository::new(config.db_pool.clone())),
        hasher: Arc::new(Argon2CredentialHasher),
        tokens: Arc::new(DieselTokenIssuer::with_ttl_minutes(
            config.db_pool.clone(),
            config.token_ttl_minutes,
        )),
        attachments: Arc::new(attachments),
    }))
}

/// Construct an Actix HTTP server over the wired state.
///
/// # Errors
/// Propagates [`std::io::Error`] when the uploads directory cannot be opened
/// or the socket cannot be bound.
pub fn create_server(config: &ServerConfig) -> std::io::Result<Server> {
    let state = web::Data::new(build_http_state(config)?);

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .wrap(Trace)
            .configure(backend::inbound::http::configure);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(config.bind_addr)?;

    Ok(server.run())
}
