use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::{bookings::BookingRecord, itinerary::ItineraryJson};

pub const STATUS_GENERATED: &str = "generated";

/// One persisted generation: the request as received, the plan, and an optional booking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryDocument {
    pub id: String,
    pub user_preferences: Value,
    pub itinerary: ItineraryJson,
    pub created_at: DateTime<Utc>,
    pub status: String,
    #[serde(flatten)]
    pub booking: Option<BookingRecord>,
}

impl ItineraryDocument {
    pub fn generated(id: String, user_preferences: Value, itinerary: ItineraryJson) -> Self {
        Self {
            id,
            user_preferences,
            itinerary,
            created_at: Utc::now(),
            status: STATUS_GENERATED.to_string(),
            booking: None,
        }
    }
}
