use actix_web::{HttpResponse, Responder};
use chrono::Local;
use serde::Serialize;

pub const SERVICE_NAME: &str = "IntelliTravel AI Backend";

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    timestamp: String,
    service: &'static str,
}

/*
    GET /api/health
*/
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthStatus {
        status: "healthy",
        timestamp: Local::now()
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string(),
        service: SERVICE_NAME,
    })
}
