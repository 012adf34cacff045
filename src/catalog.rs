//! Symptom catalog grouped by body system.
//!
//! The catalog is presentation data for clients that build symptom
//! pickers. Prediction never checks membership: a label outside the
//! catalog flows through the engine like any other.

use serde::{Deserialize, Serialize};

/// Category names, in display order.
pub const CATEGORIES: &[&str] = &[
    "General",
    "Respiratory",
    "Neurological",
    "Digestive",
    "Cardiovascular",
];

/// Symptom labels for one category. Unknown categories are empty.
pub fn symptoms_for(category: &str) -> &'static [&'static str] {
    match category {
        "General" => &["Fever", "Fatigue"],
        "Respiratory" => &["Cough", "Cold"],
        "Neurological" => &["Headache", "Dizziness"],
        "Digestive" => &["Vomiting"],
        "Cardiovascular" => &["Chest Pain"],
        _ => &[],
    }
}

/// Every catalog label, category order first, entry order second.
pub fn all_symptoms() -> Vec<&'static str> {
    CATEGORIES
        .iter()
        .flat_map(|category| symptoms_for(category).iter().copied())
        .collect()
}

/// Exact, case-sensitive membership check.
pub fn is_known_symptom(label: &str) -> bool {
    CATEGORIES
        .iter()
        .any(|category| symptoms_for(category).contains(&label))
}

/// One category with its symptoms, for API consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    pub symptoms: Vec<String>,
}

/// The whole catalog in serializable form.
pub fn catalog() -> Vec<CategoryInfo> {
    CATEGORIES
        .iter()
        .map(|name| CategoryInfo {
            name: name.to_string(),
            symptoms: symptoms_for(name).iter().map(|s| s.to_string()).collect(),
        })
        .collect()
}
