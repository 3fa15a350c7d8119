use actix_web::{web, App};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use intellitravel_api::{
    db::{memory::MemoryItineraryStore, ItineraryStore},
    models::preferences::TravelPreferences,
    routes,
    services::{
        enrichment::{EnrichmentBundle, EnrichmentProvider},
        itinerary_generation_service::ItineraryGenerator,
        vertex_text_service::{GenerationError, GenerationParameters, TextGenerator},
    },
};

/// What the stand-in model does when asked for an itinerary.
#[derive(Clone)]
pub enum ModelBehaviour {
    Reply(String),
    Fail,
}

struct StubModel(ModelBehaviour);

#[async_trait]
impl TextGenerator for StubModel {
    async fn predict(
        &self,
        _prompt: &str,
        _parameters: &GenerationParameters,
    ) -> Result<String, GenerationError> {
        match &self.0 {
            ModelBehaviour::Reply(text) => Ok(text.clone()),
            ModelBehaviour::Fail => Err(GenerationError::ResponseError(
                "Prediction request failed with status 429".to_string(),
            )),
        }
    }
}

struct StubEnrichment {
    with_data: bool,
}

#[async_trait]
impl EnrichmentProvider for StubEnrichment {
    async fn gather(&self, _preferences: &TravelPreferences) -> EnrichmentBundle {
        if !self.with_data {
            return EnrichmentBundle::default();
        }

        let mut places = BTreeMap::new();
        places.insert("tourist".to_string(), json!({"status": "OK", "results": []}));
        EnrichmentBundle {
            weather_forecast: Some(json!({"cnt": 40, "list": []})),
            places: Some(places),
            summary: Some("A test destination.".to_string()),
            cultural_notes: vec!["Information about local festivals.".to_string()],
            heritage_sites: vec![],
        }
    }
}

pub struct TestApp {
    pub store: Arc<dyn ItineraryStore>,
    pub generator: Arc<ItineraryGenerator>,
}

impl TestApp {
    pub fn new(model: ModelBehaviour) -> Self {
        Self::build(model, false)
    }

    pub fn with_enrichment(model: ModelBehaviour) -> Self {
        Self::build(model, true)
    }

    fn build(model: ModelBehaviour, with_data: bool) -> Self {
        let store: Arc<dyn ItineraryStore> = Arc::new(MemoryItineraryStore::new());
        let generator = Arc::new(ItineraryGenerator::new(
            Arc::new(StubEnrichment { with_data }),
            Some(Arc::new(StubModel(model))),
        ));

        Self { store, generator }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.store.clone()))
            .app_data(web::Data::new(self.generator.clone()))
            .configure(routes::configure)
    }
}

pub fn model_reply(itinerary: &Value) -> ModelBehaviour {
    ModelBehaviour::Reply(format!(
        "Here is a detailed plan for your trip.\n```json\n{}\n```\nHave a great journey!",
        serde_json::to_string_pretty(itinerary).unwrap()
    ))
}

pub fn sample_preferences() -> Value {
    json!({
        "destination": "Jaipur",
        "duration": 3,
        "budget": 25000,
        "start_date": "2025-11-14",
        "end_date": "2025-11-16",
        "group_size": 2,
        "interests": ["heritage", "food"]
    })
}

pub fn sample_model_itinerary() -> Value {
    json!({
        "itinerary": [
            {
                "day": 1,
                "date": "2025-11-14",
                "activities": [
                    {
                        "time": "09:00 AM",
                        "activity": "Amber Fort",
                        "location": "Amer",
                        "description": "Walk the ramparts and the Sheesh Mahal",
                        "cost": 500,
                        "category": "sightseeing"
                    }
                ],
                "accommodation": {
                    "name": "Haveli stay",
                    "cost": 3000,
                    "location": "Old City"
                },
                "total_day_cost": 3500
            }
        ],
        "total_cost": 24000,
        "transportation": {
            "to_destination": {"mode": "train", "details": "Shatabdi Express", "cost": 1500},
            "local_transport": "Auto-rickshaws within the walled city",
            "from_destination": {"mode": "train", "details": "Return Shatabdi", "cost": 1500}
        },
        "cultural_insights": ["Remove footwear at temples"],
        "packing_suggestions": ["Light cotton clothing"]
    })
}
