use actix_web::web;

pub mod destination;
pub mod health;
pub mod itinerary;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route(
                "/destinations",
                web::get().to(destination::get_destinations),
            )
            .route(
                "/generate-itinerary",
                web::post().to(itinerary::generate),
            )
            .route("/itinerary/{id}", web::get().to(itinerary::get_by_id))
            .route("/book-itinerary", web::post().to(itinerary::book)),
    );
}
