use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{ItineraryStore, StoreError};
use crate::models::{bookings::BookingRecord, itinerary::ItineraryJson, itinerary_document::ItineraryDocument};

/// Process-local store used when no MongoDB URI is configured. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryItineraryStore {
    documents: RwLock<HashMap<String, ItineraryDocument>>,
}

impl MemoryItineraryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItineraryStore for MemoryItineraryStore {
    async fn create(&self, user_preferences: Value, itinerary: ItineraryJson) -> Result<String, StoreError> {
        let id = ObjectId::new().to_hex();
        let document = ItineraryDocument::generated(id.clone(), user_preferences, itinerary);
        self.documents.write().await.insert(id.clone(), document);
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<ItineraryDocument>, StoreError> {
        Ok(self.documents.read().await.get(id).cloned())
    }

    async fn attach_booking(&self, id: &str, booking: &BookingRecord) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        let document = documents
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        document.booking = Some(booking.clone());
        Ok(())
    }
}
