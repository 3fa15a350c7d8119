use std::sync::Arc;

use serde_json::{Number, Value};
use thiserror::Error;

use crate::models::{
    itinerary::{amount, Accommodation, Activity, DayPlan, Itinerary, ItineraryJson},
    preferences::TravelPreferences,
};
use crate::services::{
    enrichment::{EnrichmentBundle, EnrichmentProvider, TravelDataEnricher},
    prompt::render_itinerary_prompt,
    vertex_text_service::{GenerationError, GenerationParameters, TextGenerator, VertexTextService},
};

pub const FALLBACK_MESSAGE: &str =
    "Basic itinerary generated. For detailed planning, please try again.";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("model output contains no JSON object")]
    NoObject,
    #[error("model output is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Turns travel preferences into an itinerary. Never fails: every external
/// problem degrades to a simpler plan.
pub struct ItineraryGenerator {
    enrichment: Arc<dyn EnrichmentProvider>,
    text_generator: Option<Arc<dyn TextGenerator>>,
    parameters: GenerationParameters,
}

impl ItineraryGenerator {
    pub fn new(
        enrichment: Arc<dyn EnrichmentProvider>,
        text_generator: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        Self {
            enrichment,
            text_generator,
            parameters: GenerationParameters::default(),
        }
    }

    pub fn from_env() -> Self {
        let text_generator: Option<Arc<dyn TextGenerator>> = match VertexTextService::new() {
            Ok(service) => {
                log::info!("VertexTextService initialized");
                Some(Arc::new(service))
            }
            Err(e) => {
                log::warn!(
                    "VertexTextService not available: {}. Every request will get the basic itinerary.",
                    e
                );
                None
            }
        };

        Self::new(Arc::new(TravelDataEnricher::from_env()), text_generator)
    }

    pub async fn generate(&self, prefs: &TravelPreferences) -> ItineraryJson {
        let bundle = self.enrichment.gather(prefs).await;

        let itinerary = match self.generate_with_model(prefs, &bundle).await {
            Ok(itinerary) => itinerary,
            Err(e) => {
                log::error!("Error generating itinerary: {}", e);
                fallback_itinerary(prefs).into_json()
            }
        };

        attach_enrichment(itinerary, bundle)
    }

    async fn generate_with_model(
        &self,
        prefs: &TravelPreferences,
        bundle: &EnrichmentBundle,
    ) -> Result<ItineraryJson, GenerationError> {
        let text_generator = self.text_generator.as_ref().ok_or_else(|| {
            GenerationError::EnvironmentError("no text generation model configured".to_string())
        })?;

        let prompt = render_itinerary_prompt(prefs, bundle);
        let generated_text = text_generator.predict(&prompt, &self.parameters).await?;

        Ok(extract_itinerary(&generated_text).unwrap_or_else(|e| {
            log::warn!("Using template itinerary: {}", e);
            template_itinerary(prefs).into_json()
        }))
    }
}

/// Parses the span from the first `{` to the last `}` of the model output as a
/// JSON object, keeping whatever keys and values the model produced.
pub fn extract_itinerary(text: &str) -> Result<ItineraryJson, ExtractError> {
    let start = text.find('{').ok_or(ExtractError::NoObject)?;
    let end = text.rfind('}').ok_or(ExtractError::NoObject)?;
    if end < start {
        return Err(ExtractError::NoObject);
    }
    Ok(serde_json::from_str(&text[start..=end])?)
}

/// One-day plan built from the preferences alone, used when the model answered
/// with something that is not an itinerary.
pub fn template_itinerary(prefs: &TravelPreferences) -> Itinerary {
    let day = DayPlan {
        day: 1,
        date: prefs.date_of_day(1),
        activities: vec![Activity {
            time: "09:00 AM".to_string(),
            activity: "Explore local attractions".to_string(),
            location: prefs.destination.clone(),
            description: "Start your journey exploring the main attractions".to_string(),
            cost: Number::from(1000),
            category: "sightseeing".to_string(),
        }],
        accommodation: Some(Accommodation {
            name: format!("Hotel in {}", prefs.destination),
            cost: Number::from(2000),
            location: "City Center".to_string(),
        }),
        total_day_cost: Number::from(3000),
    };

    Itinerary {
        days: vec![day],
        total_cost: submitted_budget(prefs),
        cultural_insights: Some(vec![
            format!("Explore the rich culture of {}", prefs.destination),
            "Respect local customs and traditions".to_string(),
        ]),
        ..Default::default()
    }
}

/// One placeholder activity per requested day with the budget split evenly.
///
/// Day totals are `floor(budget / duration)` and activities a third of that,
/// rounded down; the remainder is not redistributed. A duration of zero or
/// less yields no days.
pub fn fallback_itinerary(prefs: &TravelPreferences) -> Itinerary {
    let days = prefs.days();
    let day_cost = if days == 0 {
        0.0
    } else {
        (prefs.budget / f64::from(days)).floor()
    };
    let activity_cost = (day_cost / 3.0).floor();

    let days = (1..=days)
        .map(|day| DayPlan {
            day,
            date: prefs.date_of_day(day),
            activities: vec![Activity {
                time: "09:00 AM".to_string(),
                activity: format!("Day {} exploration", day),
                location: prefs.destination.clone(),
                description: format!("Explore {} on day {}", prefs.destination, day),
                cost: amount(activity_cost),
                category: "sightseeing".to_string(),
            }],
            accommodation: None,
            total_day_cost: amount(day_cost),
        })
        .collect();

    Itinerary {
        days,
        total_cost: submitted_budget(prefs),
        message: Some(FALLBACK_MESSAGE.to_string()),
        ..Default::default()
    }
}

/// The budget exactly as the caller sent it.
fn submitted_budget(prefs: &TravelPreferences) -> Value {
    prefs
        .raw("budget")
        .cloned()
        .unwrap_or_else(|| Value::Number(amount(prefs.budget)))
}

/// Adds the fetched weather and places data to the itinerary, whichever tier produced it.
pub fn attach_enrichment(mut itinerary: ItineraryJson, bundle: EnrichmentBundle) -> ItineraryJson {
    if let Some(weather) = bundle.weather_forecast {
        itinerary.insert("weather_forecast".to_string(), weather);
    }
    if let Some(places) = bundle.places {
        itinerary.insert("nearby_places".to_string(), Value::Object(places.into_iter().collect()));
    }
    itinerary
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    struct FixedEnrichment(EnrichmentBundle);

    #[async_trait]
    impl EnrichmentProvider for FixedEnrichment {
        async fn gather(&self, _preferences: &TravelPreferences) -> EnrichmentBundle {
            self.0.clone()
        }
    }

    struct ScriptedModel {
        reply: Result<String, String>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(reason: &str) -> Self {
            Self {
                reply: Err(reason.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedModel {
        async fn predict(
            &self,
            prompt: &str,
            parameters: &GenerationParameters,
        ) -> Result<String, GenerationError> {
            assert_eq!(*parameters, GenerationParameters::default());
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply
                .clone()
                .map_err(GenerationError::ResponseError)
        }
    }

    fn preferences(duration: Value, budget: Value) -> TravelPreferences {
        TravelPreferences::from_request_body(&json!({
            "destination": "Agra",
            "duration": duration,
            "budget": budget,
            "start_date": "2025-01-30",
            "group_size": 2,
            "interests": ["history"]
        }))
        .unwrap()
    }

    fn generator(bundle: EnrichmentBundle, model: Option<Arc<ScriptedModel>>) -> ItineraryGenerator {
        ItineraryGenerator::new(
            Arc::new(FixedEnrichment(bundle)),
            model.map(|m| m as Arc<dyn TextGenerator>),
        )
    }

    fn as_json(itinerary: ItineraryJson) -> Value {
        Value::Object(itinerary)
    }

    #[test]
    fn fallback_splits_budget_per_day() {
        let json = as_json(fallback_itinerary(&preferences(json!(3), json!(10000))).into_json());

        let days = json["itinerary"].as_array().unwrap();
        assert_eq!(days.len(), 3);
        for (index, day) in days.iter().enumerate() {
            assert_eq!(day["day"], index as u64 + 1);
            assert_eq!(day["total_day_cost"], json!(3333));
            assert_eq!(day["activities"][0]["cost"], json!(1111));
        }
        assert_eq!(json["itinerary"][2]["date"], "2025-02-01");
        assert_eq!(json["itinerary"][1]["activities"][0]["activity"], "Day 2 exploration");
        assert_eq!(json["total_cost"], json!(10000));
        assert_eq!(json["message"], FALLBACK_MESSAGE);
    }

    #[test]
    fn fallback_without_positive_duration_has_no_days() {
        for duration in [json!(0), json!(-2), json!("soon")] {
            let json = as_json(fallback_itinerary(&preferences(duration, json!(5000))).into_json());
            assert_eq!(json["itinerary"], json!([]));
            assert_eq!(json["total_cost"], json!(5000));
        }
    }

    #[test]
    fn fallback_reads_numeric_strings_and_echoes_budget() {
        let json = as_json(fallback_itinerary(&preferences(json!("2"), json!("9001"))).into_json());

        assert_eq!(json["itinerary"].as_array().unwrap().len(), 2);
        assert_eq!(json["itinerary"][0]["total_day_cost"], json!(4500));
        assert_eq!(json["itinerary"][0]["activities"][0]["cost"], json!(1500));
        assert_eq!(json["total_cost"], json!("9001"));
    }

    #[test]
    fn extracts_object_surrounded_by_prose() {
        let text = r#"Here is your plan:
```json
{"itinerary": [{"day": 1, "date": "2025-01-30", "activities": []}], "total_cost": 9000}
```
Enjoy!"#;

        let itinerary = extract_itinerary(text).unwrap();
        assert_eq!(itinerary["itinerary"].as_array().unwrap().len(), 1);
        assert_eq!(itinerary["total_cost"], json!(9000));
    }

    #[test]
    fn extracted_object_is_kept_as_written() {
        let produced = json!({
            "itinerary": [{
                "day": "1",
                "date": null,
                "activities": [{
                    "activity": "Agra Fort",
                    "cost": "₹500",
                    "tips": {"entry": "Amar Singh Gate"}
                }],
                "meals": ["Petha", "Bedai"]
            }],
            "total_cost": "₹500",
            "notes": "Closed on Fridays"
        });

        let itinerary = extract_itinerary(&format!("Plan: {} Done.", produced)).unwrap();
        assert_eq!(as_json(itinerary), produced);

        let empty = extract_itinerary(r#"{"itinerary": []}"#).unwrap();
        assert_eq!(as_json(empty), json!({"itinerary": []}));
    }

    #[test]
    fn text_without_braces_is_not_an_itinerary() {
        assert!(matches!(
            extract_itinerary("I cannot help with that."),
            Err(ExtractError::NoObject)
        ));
        assert!(matches!(extract_itinerary("} then {"), Err(ExtractError::NoObject)));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        assert!(matches!(
            extract_itinerary("{\"itinerary\": [ }"),
            Err(ExtractError::Decode(_))
        ));
    }

    #[test]
    fn template_is_built_from_preferences() {
        let json = as_json(template_itinerary(&preferences(json!(5), json!(20000))).into_json());

        assert_eq!(json["itinerary"].as_array().unwrap().len(), 1);
        assert_eq!(json["itinerary"][0]["date"], "2025-01-30");
        assert_eq!(json["itinerary"][0]["accommodation"]["name"], "Hotel in Agra");
        assert_eq!(json["itinerary"][0]["total_day_cost"], json!(3000));
        assert_eq!(json["total_cost"], json!(20000));
        assert_eq!(json["cultural_insights"][0], "Explore the rich culture of Agra");
    }

    #[tokio::test]
    async fn model_json_is_returned_as_produced() {
        let reply = json!({
            "itinerary": [{
                "day": 1,
                "date": "2025-01-30",
                "activities": [{
                    "time": "06:00 AM",
                    "activity": "Taj Mahal at sunrise",
                    "location": "Taj Ganj",
                    "description": "Beat the crowds",
                    "cost": "₹1300",
                    "category": "sightseeing",
                    "tips": {"closed": "Friday"}
                }],
                "total_day_cost": 1300
            }],
            "total_cost": 1300,
            "packing_suggestions": ["Scarf"]
        });
        let model = Arc::new(ScriptedModel::replying(&format!("Sure!\n{}\n", reply)));

        let itinerary = generator(EnrichmentBundle::default(), Some(model.clone()))
            .generate(&preferences(json!(1), json!(5000)))
            .await;

        assert_eq!(as_json(itinerary), reply);
        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("1-day itinerary for Agra"));
    }

    #[tokio::test]
    async fn unparseable_reply_uses_template() {
        let model = Arc::new(ScriptedModel::replying("Day 1: visit the fort. Day 2: rest."));
        let prefs = preferences(json!(2), json!(8000));

        let itinerary = generator(EnrichmentBundle::default(), Some(model))
            .generate(&prefs)
            .await;

        assert_eq!(itinerary, template_itinerary(&prefs).into_json());
    }

    #[tokio::test]
    async fn model_failure_uses_static_fallback() {
        let model = Arc::new(ScriptedModel::failing("quota exceeded"));
        let prefs = preferences(json!(4), json!(9999));

        let itinerary = generator(EnrichmentBundle::default(), Some(model))
            .generate(&prefs)
            .await;

        assert_eq!(itinerary, fallback_itinerary(&prefs).into_json());
    }

    #[tokio::test]
    async fn missing_model_uses_static_fallback() {
        let itinerary = generator(EnrichmentBundle::default(), None)
            .generate(&preferences(json!(2), json!(3000)))
            .await;

        assert_eq!(itinerary["message"], FALLBACK_MESSAGE);
        assert_eq!(itinerary["itinerary"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn enrichment_is_attached_on_every_tier() {
        let mut places = BTreeMap::new();
        places.insert("tourist".to_string(), json!({"results": []}));
        let bundle = EnrichmentBundle {
            weather_forecast: Some(json!({"cnt": 40})),
            places: Some(places),
            ..Default::default()
        };
        let model_reply = r#"{"itinerary": [{"day": 1, "cost": "free"}]}"#;

        let fallback = generator(bundle.clone(), None)
            .generate(&preferences(json!(1), json!(1000)))
            .await;
        let template = generator(bundle.clone(), Some(Arc::new(ScriptedModel::replying("no json"))))
            .generate(&preferences(json!(1), json!(1000)))
            .await;
        let produced = generator(bundle, Some(Arc::new(ScriptedModel::replying(model_reply))))
            .generate(&preferences(json!(1), json!(1000)))
            .await;

        assert_eq!(produced["itinerary"][0]["cost"], "free");
        for itinerary in [fallback, template, produced] {
            let json = as_json(itinerary);
            assert_eq!(json["weather_forecast"]["cnt"], 40);
            assert!(json["nearby_places"]["tourist"].is_object());
        }
    }
}
