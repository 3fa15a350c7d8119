use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Destination {
    pub name: &'static str,
    pub state: &'static str,
    #[serde(rename = "type")]
    pub category: &'static str,
}

const fn destination(name: &'static str, state: &'static str, category: &'static str) -> Destination {
    Destination {
        name,
        state,
        category,
    }
}

pub const POPULAR_DESTINATIONS: [Destination; 10] = [
    destination("Delhi", "Delhi", "Historical"),
    destination("Mumbai", "Maharashtra", "Metropolitan"),
    destination("Goa", "Goa", "Beach"),
    destination("Jaipur", "Rajasthan", "Heritage"),
    destination("Kerala", "Kerala", "Nature"),
    destination("Agra", "Uttar Pradesh", "Historical"),
    destination("Manali", "Himachal Pradesh", "Adventure"),
    destination("Rishikesh", "Uttarakhand", "Spiritual"),
    destination("Udaipur", "Rajasthan", "Heritage"),
    destination("Darjeeling", "West Bengal", "Hill Station"),
];
