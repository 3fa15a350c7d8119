use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use intellitravel_api::{
    db::{
        memory::MemoryItineraryStore,
        mongo::{create_mongo_client, MongoItineraryStore, DEFAULT_DATABASE},
        ItineraryStore,
    },
    routes,
    services::itinerary_generation_service::ItineraryGenerator,
};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

async fn build_store() -> std::io::Result<Arc<dyn ItineraryStore>> {
    let Ok(mongo_uri) = std::env::var("MONGODB_URI") else {
        log::warn!("MONGODB_URI not set, itineraries are kept in memory only");
        return Ok(Arc::new(MemoryItineraryStore::new()));
    };

    let database = std::env::var("MONGODB_DATABASE").unwrap_or_else(|_| DEFAULT_DATABASE.to_string());
    let client = create_mongo_client(&mongo_uri)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    log::info!("MongoDB connection established, using database {}", database);

    Ok(Arc::new(MongoItineraryStore::new(client, &database)))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    let store = build_store().await?;
    let generator = Arc::new(ItineraryGenerator::from_env());

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(generator.clone()))
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
