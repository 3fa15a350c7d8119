use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::models::destination::POPULAR_DESTINATIONS;

/*
    GET /api/destinations
*/
pub async fn get_destinations() -> impl Responder {
    HttpResponse::Ok().json(json!({ "destinations": POPULAR_DESTINATIONS }))
}
