mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod store;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::{Compress, Logger}, web, App, HttpServer};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{AppConfig, StorageBackend};
use crate::services::UserService;
use crate::store::{InMemoryUserStore, MongoUserStore, UserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    log::info!("🚀 Starting User Service...");

    // Open storage; the MongoDB handle is kept so it can be closed on shutdown
    let (store, db): (Arc<dyn UserStore>, Option<database::MongoDB>) = match config.storage {
        StorageBackend::MongoDB => {
            let db = database::MongoDB::connect(&config).await.map_err(|e| {
                log::error!("❌ Failed to connect to MongoDB: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
            })?;
            log::info!("✅ MongoDB connected successfully (database: {})", db.database_name());
            let store: Arc<dyn UserStore> =
                Arc::new(MongoUserStore::new(db.clone(), &config.users_collection));
            (store, Some(db))
        }
        StorageBackend::Memory => {
            log::warn!("⚠️  Using in-memory user store; data is lost on restart");
            let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
            (store, None)
        }
    };

    let user_service = web::Data::new(UserService::new(store));
    let cors_origins = config.cors_origins.clone();

    log::info!("🌐 Server starting on {}", config.bind_address());
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", config.bind_address());

    let result = HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(user_service.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .route("/health", web::get().to(api::health::health_check))
            .configure(api::users::configure)
            .default_service(web::to(api::users::not_found))
    })
    .bind(config.bind_address())?
    .run()
    .await;

    log::info!("🛑 Server stopped");

    if let Some(db) = db {
        db.shutdown().await;
    }

    result
}
