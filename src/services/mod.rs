pub mod enrichment;
pub mod itinerary_generation_service;
pub mod knowledge_base;
pub mod places_service;
pub mod prompt;
pub mod vertex_text_service;
pub mod weather_service;
pub mod wikipedia_service;
