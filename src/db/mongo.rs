use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use super::{ItineraryStore, StoreError};
use crate::models::{
    bookings::{BookingRecord, BookingStatus},
    itinerary::ItineraryJson,
    itinerary_document::{ItineraryDocument, STATUS_GENERATED},
};

pub const DEFAULT_DATABASE: &str = "Itineraries";
const COLLECTION: &str = "Generated";

pub async fn create_mongo_client(uri: &str) -> Result<Arc<Client>, mongodb::error::Error> {
    log::info!("Connecting to MongoDB...");

    let mut client_options = ClientOptions::parse(uri).await?;

    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    // Server API pinning requires MongoDB 5.0+
    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client = Client::with_options(client_options)?;

    match client
        .database(DEFAULT_DATABASE)
        .run_command(doc! {"ping": 1})
        .await
    {
        Ok(_) => log::info!("Successfully connected to MongoDB and verified with ping command"),
        Err(e) => {
            log::warn!("Connected to MongoDB but ping test failed: {}", e);
            log::warn!("The API may still work, but persistence might be impaired");
        }
    }

    Ok(Arc::new(client))
}

/// Document shape inside the `Generated` collection.
#[derive(Debug, Serialize, Deserialize)]
struct StoredItinerary {
    #[serde(rename = "_id")]
    id: ObjectId,
    user_preferences: Value,
    itinerary: ItineraryJson,
    created_at: DateTime,
    status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    booking_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    booking_details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    booking_status: Option<BookingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    booked_at: Option<DateTime>,
}

impl From<StoredItinerary> for ItineraryDocument {
    fn from(stored: StoredItinerary) -> Self {
        let booking = match (
            stored.booking_id,
            stored.booking_status,
            stored.booked_at,
        ) {
            (Some(booking_id), Some(booking_status), Some(booked_at)) => Some(BookingRecord {
                booking_id,
                booking_details: stored.booking_details.unwrap_or(Value::Null),
                booking_status,
                booked_at: booked_at.to_chrono(),
            }),
            _ => None,
        };

        ItineraryDocument {
            id: stored.id.to_hex(),
            user_preferences: stored.user_preferences,
            itinerary: stored.itinerary,
            created_at: stored.created_at.to_chrono(),
            status: stored.status,
            booking,
        }
    }
}

pub struct MongoItineraryStore {
    collection: Collection<StoredItinerary>,
}

impl MongoItineraryStore {
    pub fn new(client: Arc<Client>, database: &str) -> Self {
        Self {
            collection: client.database(database).collection(COLLECTION),
        }
    }
}

#[async_trait]
impl ItineraryStore for MongoItineraryStore {
    async fn create(&self, user_preferences: Value, itinerary: ItineraryJson) -> Result<String, StoreError> {
        let stored = StoredItinerary {
            id: ObjectId::new(),
            user_preferences,
            itinerary,
            created_at: DateTime::now(),
            status: STATUS_GENERATED.to_string(),
            booking_id: None,
            booking_details: None,
            booking_status: None,
            booked_at: None,
        };

        self.collection.insert_one(&stored).await?;
        Ok(stored.id.to_hex())
    }

    async fn get(&self, id: &str) -> Result<Option<ItineraryDocument>, StoreError> {
        let id = match ObjectId::parse_str(id) {
            Ok(id) => id,
            Err(_) => return Ok(None),
        };

        let found = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(found.map(ItineraryDocument::from))
    }

    async fn attach_booking(&self, id: &str, booking: &BookingRecord) -> Result<(), StoreError> {
        let object_id =
            ObjectId::parse_str(id).map_err(|_| StoreError::NotFound(id.to_string()))?;

        let update = doc! {
            "$set": {
                "booking_id": booking.booking_id.clone(),
                "booking_details": bson::to_bson(&booking.booking_details)?,
                "booking_status": bson::to_bson(&booking.booking_status)?,
                "booked_at": DateTime::from_chrono(booking.booked_at),
            }
        };

        let result = self
            .collection
            .update_one(doc! { "_id": object_id }, update)
            .await?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
