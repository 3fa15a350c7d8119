//! Curated destination knowledge. Placeholder notes are returned until the
//! festival/etiquette and heritage-site collections are populated.

pub fn cultural_insights(_destination: &str) -> Vec<String> {
    vec![
        "Information about local festivals.".to_string(),
        "Tips on cultural etiquette.".to_string(),
    ]
}

pub fn heritage_sites(_destination: &str) -> Vec<String> {
    vec!["List of UNESCO sites near the destination.".to_string()]
}
