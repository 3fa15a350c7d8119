use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
}

/// Booking fields attached to a stored itinerary. A second booking replaces the first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRecord {
    pub booking_id: String,
    pub booking_details: Value,
    pub booking_status: BookingStatus,
    pub booked_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct BookingInput {
    pub itinerary_id: Option<String>,
    #[serde(default = "empty_details")]
    pub booking_details: Value,
}

fn empty_details() -> Value {
    Value::Object(Map::new())
}

impl BookingRecord {
    pub fn confirm(booking_details: Value) -> Self {
        Self {
            booking_id: booking_id_at(Local::now()),
            booking_details,
            booking_status: BookingStatus::Confirmed,
            booked_at: Utc::now(),
        }
    }
}

/// `BOOK_<YYYYMMDD>_<HHMMSS>` from the server's local clock.
pub fn booking_id_at(now: DateTime<Local>) -> String {
    format!("BOOK_{}", now.format("%Y%m%d_%H%M%S"))
}
