use actix_web::{web, HttpResponse, Responder};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    db::ItineraryStore,
    models::{
        bookings::{BookingInput, BookingRecord},
        preferences::TravelPreferences,
    },
    services::itinerary_generation_service::ItineraryGenerator,
};

/*
    POST /api/generate-itinerary
*/
pub async fn generate(
    store: web::Data<Arc<dyn ItineraryStore>>,
    generator: web::Data<Arc<ItineraryGenerator>>,
    input: web::Json<Value>,
) -> impl Responder {
    let body = input.into_inner();

    let preferences = match TravelPreferences::from_request_body(&body) {
        Ok(preferences) => preferences,
        Err(err) => {
            log::info!("Rejected itinerary request: {}", err.message());
            return HttpResponse::BadRequest().json(json!({ "error": err.message() }));
        }
    };

    log::info!(
        "Generating {}-day itinerary for {}",
        preferences.duration,
        preferences.destination
    );
    let itinerary = generator.generate(&preferences).await;

    match store.create(body, itinerary.clone()).await {
        Ok(itinerary_id) => HttpResponse::Ok().json(json!({
            "success": true,
            "itinerary": itinerary,
            "itinerary_id": itinerary_id,
        })),
        Err(err) => {
            log::error!("Failed to save itinerary: {}", err);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to generate itinerary" }))
        }
    }
}

/*
    GET /api/itinerary/{id}
*/
pub async fn get_by_id(
    path: web::Path<String>,
    store: web::Data<Arc<dyn ItineraryStore>>,
) -> impl Responder {
    let id = path.into_inner();

    match store.get(&id).await {
        Ok(Some(document)) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": document,
        })),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "Itinerary not found" })),
        Err(err) => {
            log::error!("Failed to retrieve itinerary {}: {}", id, err);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to retrieve itinerary" }))
        }
    }
}

/*
    POST /api/book-itinerary
*/
pub async fn book(
    store: web::Data<Arc<dyn ItineraryStore>>,
    input: web::Json<BookingInput>,
) -> impl Responder {
    let input = input.into_inner();

    let Some(itinerary_id) = input.itinerary_id else {
        log::error!("Booking request without itinerary_id");
        return HttpResponse::InternalServerError().json(json!({ "error": "Booking failed" }));
    };

    let booking = BookingRecord::confirm(input.booking_details);

    match store.attach_booking(&itinerary_id, &booking).await {
        Ok(()) => {
            log::info!("Booked itinerary {} as {}", itinerary_id, booking.booking_id);
            HttpResponse::Ok().json(json!({
                "success": true,
                "booking_id": booking.booking_id,
                "message": "Booking confirmed successfully!",
            }))
        }
        Err(err) => {
            log::error!("Failed to book itinerary {}: {}", itinerary_id, err);
            HttpResponse::InternalServerError().json(json!({ "error": "Booking failed" }))
        }
    }
}
