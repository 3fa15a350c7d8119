pub mod bookings;
pub mod destination;
pub mod itinerary;
pub mod itinerary_document;
pub mod preferences;
