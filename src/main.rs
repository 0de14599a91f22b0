use actix_web::{middleware::Logger, web, App, HttpServer};
use activity_hub::config::EnvConfig;
use activity_hub::db::database_service::DatabaseService;
use activity_hub::routes::configure_routes;
use activity_hub::utils::jwt::JwtService;
use std::io;
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init();
    let config = EnvConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let addr = format!("0.0.0.0:{}", config.port);

    let database_service = Arc::new(
        DatabaseService::new(&config.database_url, config.db_max_connections)
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?,
    );
    let jwt = web::Data::new(JwtService::new(&config.jwt));
    let config = web::Data::new(config);

    info!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(Arc::clone(&database_service)))
            .app_data(jwt.clone())
            .app_data(config.clone())
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
