use super::enrichment::EnrichmentBundle;
use crate::models::preferences::TravelPreferences;

/// Example document the model is asked to reproduce.
const OUTPUT_SCHEMA: &str = r#"{
    "itinerary": [
        {
            "day": 1,
            "date": "YYYY-MM-DD",
            "activities": [
                {
                    "time": "09:00 AM",
                    "activity": "Activity name",
                    "location": "Specific location",
                    "description": "Detailed description",
                    "cost": 500,
                    "category": "sightseeing/food/transport/accommodation"
                }
            ],
            "accommodation": {
                "name": "Hotel name",
                "cost": 2000,
                "location": "Area"
            },
            "total_day_cost": 3500
        }
    ],
    "total_cost": 25000,
    "transportation": {
        "to_destination": {
            "mode": "train/flight",
            "details": "Specific train/flight details",
            "cost": 3000
        },
        "local_transport": "Auto/taxi/bus recommendations",
        "from_destination": {
            "mode": "train/flight",
            "details": "Return details",
            "cost": 3000
        }
    },
    "cultural_insights": [
        "Local customs to be aware of",
        "Festival information if applicable",
        "Regional etiquette"
    ],
    "packing_suggestions": [
        "Weather-appropriate clothing",
        "Cultural considerations",
        "Essential items"
    ]
}"#;

pub fn render_itinerary_prompt(prefs: &TravelPreferences, bundle: &EnrichmentBundle) -> String {
    let budget = prefs.text("budget");
    let mut prompt = String::with_capacity(4096);

    prompt.push_str(
        "You are an expert Indian travel planner with deep knowledge of Indian culture, geography, and travel patterns.\n\
         You have access to additional information to create a richer itinerary.\n\n",
    );

    prompt.push_str(&format!(
        "**Destination Overview:**\n{}\n\n\
         **Additional Cultural Information:**\n\
         - Cultural Insights: {}\n\
         - UNESCO World Heritage Sites: {}\n\n",
        bundle.summary.as_deref().unwrap_or_default(),
        bundle.cultural_notes.join(", "),
        bundle.heritage_sites.join(", "),
    ));

    prompt.push_str(&format!(
        "Create a detailed {duration}-day itinerary for {destination} with the following requirements:\n\n\
         **Travel Details:**\n\
         - Destination: {destination}\n\
         - Duration: {duration} days\n\
         - Budget: ₹{budget}\n\
         - Travel Dates: {start} to {end}\n\
         - Group Size: {group} people\n\
         - Interests: {interests}\n\n",
        duration = prefs.text("duration"),
        destination = prefs.destination,
        budget = budget,
        start = prefs.text("start_date"),
        end = prefs.end_date_text(),
        group = prefs.group_size_text(),
        interests = prefs.interests.join(", "),
    ));

    prompt.push_str(&format!(
        "**Requirements:**\n\
         1. Stay within the budget of ₹{budget}\n\
         2. Include cultural experiences specific to the region\n\
         3. Suggest local cuisine and restaurants\n\
         4. Include transportation details (train/flight/local transport)\n\
         5. Add seasonal considerations and weather-appropriate activities\n\
         6. Include UNESCO heritage sites if available in the region\n\
         7. Provide cost breakdown for each day\n\n\
         **Output Format (JSON):**\n{schema}\n",
        budget = budget,
        schema = OUTPUT_SCHEMA,
    ));

    prompt
}
