use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::{bookings::BookingRecord, itinerary::ItineraryJson, itinerary_document::ItineraryDocument};

pub mod memory;
pub mod mongo;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("itinerary {0} not found")]
    NotFound(String),
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("failed to encode document: {0}")]
    Encode(#[from] bson::ser::Error),
    #[error("failed to decode document: {0}")]
    Decode(#[from] bson::de::Error),
}

/// Persistence for generated itineraries, addressed by an opaque string id.
#[async_trait]
pub trait ItineraryStore: Send + Sync {
    /// Saves a fresh document with status `generated` and returns its id.
    async fn create(&self, user_preferences: Value, itinerary: ItineraryJson) -> Result<String, StoreError>;

    /// `Ok(None)` when no document has this id, including ids that cannot exist.
    async fn get(&self, id: &str) -> Result<Option<ItineraryDocument>, StoreError>;

    /// Writes the booking fields onto an existing document, replacing earlier ones.
    async fn attach_booking(&self, id: &str, booking: &BookingRecord) -> Result<(), StoreError>;
}
