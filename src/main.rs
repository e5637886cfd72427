mod config;
mod controllers;
mod dtos;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_files::Files;
use actix_session::{config::PersistentSession, storage::CookieSessionStore, SessionMiddleware};
use actix_web::{
    cookie::{time::Duration, Key},
    middleware::{from_fn, Logger},
    web::{self, Data},
    App, HttpServer,
};
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::controllers::{document_controller, login_controller, report_controller};
use crate::middleware::require_login;
use crate::services::{
    db::Database, document_service::DocumentService, report_service::ReportService,
};
use crate::utils::storage::FileStorage;

fn init_tracing() {
    let _ = tracing_log::LogTracer::init();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn session_key(config: &Config) -> Key {
    match config.session_secret.as_deref() {
        // derive_from needs at least 32 bytes of input.
        Some(secret) if secret.len() >= 32 => Key::derive_from(secret.as_bytes()),
        Some(_) => {
            warn!("SESSION_SECRET is shorter than 32 bytes, using a generated key");
            Key::generate()
        }
        None => {
            warn!("SESSION_SECRET not set, sessions will not survive a restart");
            Key::generate()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    init_tracing();

    let config = Config::init();
    let db = Database::init(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;
    let storage = FileStorage::new(config.storage_root.clone());
    let documents = DocumentService::new(db.clone(), storage.clone());
    let reports = ReportService::new(documents.clone());

    let key = session_key(&config);
    let session_ttl = Duration::minutes(config.session_ttl_minutes);
    let port = config.port;
    info!(port, "starting server");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_http_only(true)
                    .cookie_secure(false)
                    .session_lifecycle(PersistentSession::default().session_ttl(session_ttl))
                    .build(),
            )
            .app_data(Data::new(db.clone()))
            .app_data(Data::new(documents.clone()))
            .app_data(Data::new(reports.clone()))
            .service(web::scope("/login").configure(login_controller::init))
            .service(
                web::scope("/documents")
                    .wrap(from_fn(require_login))
                    .configure(document_controller::init),
            )
            .service(
                web::scope("/reports")
                    .wrap(from_fn(require_login))
                    .configure(report_controller::init),
            )
            .service(Files::new("/uploads", storage.uploads_dir()))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
