use serde::Serialize;
use serde_json::{Map, Number, Value};

/// An itinerary as returned to callers and persisted: a JSON object.
///
/// Model output is carried exactly as produced; the typed plan below is only
/// used to build the fallback itineraries.
pub type ItineraryJson = Map<String, Value>;

/// A locally built day-by-day plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Itinerary {
    #[serde(rename = "itinerary")]
    pub days: Vec<DayPlan>,
    pub total_cost: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cultural_insights: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    pub day: u32,
    pub date: String,
    pub activities: Vec<Activity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<Accommodation>,
    pub total_day_cost: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    pub time: String,
    pub activity: String,
    pub location: String,
    pub description: String,
    pub cost: Number,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Accommodation {
    pub name: String,
    pub cost: Number,
    pub location: String,
}

impl Itinerary {
    pub fn into_json(self) -> ItineraryJson {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                log::error!("Itinerary serialized to a non-object: {}", other);
                Map::new()
            }
            Err(e) => {
                log::error!("Failed to serialize itinerary: {}", e);
                Map::new()
            }
        }
    }
}

/// Renders a currency amount as a JSON number, keeping whole amounts integral.
pub fn amount(value: f64) -> Number {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Number::from(value as i64)
    } else {
        Number::from_f64(value).unwrap_or_else(|| Number::from(0))
    }
}
