//! Offline strategy: exact-set lookup over a fixed table of known
//! symptom combinations, with a rotating fallback for misses.

use std::collections::HashMap;
use std::sync::LazyLock;

use async_trait::async_trait;

use crate::engine::canonical::{canonical_key, distinct_labels};
use crate::engine::{CancelToken, EngineMode, PredictionError, Predictor};
use crate::models::{AlternativeDiagnosis, Prediction, Severity, Urgency};

// ═══════════════════════════════════════════════════════════
// Seed records
// ═══════════════════════════════════════════════════════════

#[allow(clippy::too_many_arguments)]
fn record(
    disease: &str,
    confidence: u8,
    severity: Severity,
    urgency: Urgency,
    specialist: &str,
    description: &str,
    tips: &[&str],
    advice: &str,
) -> Prediction {
    Prediction {
        disease: disease.to_string(),
        confidence,
        severity,
        description: description.to_string(),
        tips: tips.iter().map(|tip| tip.to_string()).collect(),
        specialist: specialist.to_string(),
        alternative_diagnoses: Vec::new(),
        urgency: Some(urgency),
        when_to_see_doctor: Some(advice.to_string()),
    }
}

fn alt(disease: &str, confidence: u8) -> AlternativeDiagnosis {
    AlternativeDiagnosis {
        disease: disease.to_string(),
        confidence,
    }
}

fn with_alternatives(
    mut prediction: Prediction,
    alternatives: Vec<AlternativeDiagnosis>,
) -> Prediction {
    prediction.alternative_diagnoses = alternatives;
    prediction
}

/// Known symptom combinations keyed by canonical symptom key.
/// Immutable for the lifetime of the process.
static KNOWN_COMBINATIONS: LazyLock<HashMap<String, Prediction>> = LazyLock::new(|| {
    let seed: Vec<(&[&str], Prediction)> = vec![
        (
            &["Fever", "Cough", "Cold"],
            with_alternatives(
                record(
                    "Common Flu",
                    87,
                    Severity::Moderate,
                    Urgency::Soon,
                    "General Physician",
                    "Influenza, a viral infection of the nose, throat and airways. \
                     Fever together with cough and a blocked or runny nose is the \
                     classic presentation.",
                    &[
                        "Rest and drink plenty of fluids",
                        "Take paracetamol for fever and body aches",
                        "Gargle warm salt water to ease throat irritation",
                        "Stay home until the fever has settled",
                    ],
                    "See a doctor if the fever lasts beyond three days or breathing \
                     becomes difficult.",
                ),
                vec![alt("Common Cold", 68), alt("COVID-19", 54)],
            ),
        ),
        (
            &["Fever", "Headache", "Fatigue"],
            record(
                "Viral Infection",
                79,
                Severity::Moderate,
                Urgency::Soon,
                "General Physician",
                "A systemic viral illness. Fever with headache and tiredness \
                 usually reflects the immune response rather than the virus itself.",
                &[
                    "Sleep as much as your body asks for",
                    "Keep up fluid intake through the day",
                    "Use paracetamol to control fever and headache",
                ],
                "Consult a doctor if symptoms persist beyond five days or a rash \
                 appears.",
            ),
        ),
        (
            &["Chest Pain", "Dizziness"],
            with_alternatives(
                record(
                    "Hypertension",
                    72,
                    Severity::High,
                    Urgency::Urgent,
                    "Cardiologist",
                    "Elevated blood pressure can present as chest discomfort with \
                     light-headedness. The combination warrants a prompt blood \
                     pressure check.",
                    &[
                        "Sit down and rest immediately",
                        "Avoid caffeine, nicotine and salty food today",
                        "Have your blood pressure measured as soon as possible",
                    ],
                    "Seek immediate care if the chest pain spreads to the arm, neck \
                     or jaw, or comes with breathlessness or sweating.",
                ),
                vec![alt("Anxiety Disorder", 48), alt("Cardiac Arrhythmia", 41)],
            ),
        ),
        (
            &["Vomiting", "Fatigue", "Dizziness"],
            record(
                "Food Poisoning",
                83,
                Severity::Moderate,
                Urgency::Soon,
                "Gastroenterologist",
                "Foodborne illness from contaminated food or water. Vomiting with \
                 weakness and dizziness commonly signals fluid loss.",
                &[
                    "Sip oral rehydration solution in small, frequent amounts",
                    "Avoid solid food until the vomiting settles",
                    "Reintroduce bland food such as rice or toast gradually",
                ],
                "See a doctor if you cannot keep fluids down for more than twelve \
                 hours or notice blood in the vomit.",
            ),
        ),
        (
            &["Fever", "Cough", "Chest Pain"],
            record(
                "Bronchitis",
                76,
                Severity::Moderate,
                Urgency::Soon,
                "Pulmonologist",
                "Inflammation of the bronchial tubes, often following a respiratory \
                 infection. Repeated coughing fits can leave the chest wall sore.",
                &[
                    "Inhale steam twice a day to loosen mucus",
                    "Drink warm fluids to soothe the airways",
                    "Avoid smoke and dusty environments",
                ],
                "Consult a doctor if you cough up discoloured phlegm or the fever \
                 keeps climbing.",
            ),
        ),
        (
            &["Headache", "Dizziness"],
            record(
                "Migraine",
                81,
                Severity::Low,
                Urgency::Routine,
                "Neurologist",
                "A neurological headache disorder. Throbbing head pain with \
                 dizziness, often with sensitivity to light or sound, fits a \
                 migraine episode.",
                &[
                    "Rest in a dark, quiet room",
                    "Apply a cold compress to the forehead",
                    "Keep a headache diary to spot personal triggers",
                ],
                "See a doctor if the headache is the worst you have ever had or \
                 arrived suddenly.",
            ),
        ),
    ];

    seed.into_iter()
        .map(|(symptoms, prediction)| (canonical_key(symptoms), prediction))
        .collect()
});

/// Fallback records for unmatched sets. The entry is picked by the
/// distinct symptom count modulo the rotation length, so a given set
/// always lands on the same record.
static FALLBACK_ROTATION: LazyLock<Vec<Prediction>> = LazyLock::new(|| {
    vec![
        record(
            "General Viral Infection",
            65,
            Severity::Low,
            Urgency::Routine,
            "General Physician",
            "The reported combination does not match a specific pattern. A mild \
             viral infection is the most common explanation for general symptoms.",
            &[
                "Rest and stay hydrated",
                "Monitor your symptoms for changes",
                "Treat fever or aches with paracetamol if needed",
            ],
            "Consult a doctor if symptoms worsen or new ones appear.",
        ),
        record(
            "Seasonal Allergy",
            58,
            Severity::Low,
            Urgency::Routine,
            "Allergist",
            "Airborne allergens such as pollen or dust can produce a shifting mix \
             of mild symptoms, especially around season changes.",
            &[
                "Keep windows closed on high pollen days",
                "Rinse your nose with a saline spray",
                "Consider an over-the-counter antihistamine",
            ],
            "See an allergist if the same symptoms return every season or disturb \
             your sleep.",
        ),
        record(
            "Mild Flu",
            71,
            Severity::Low,
            Urgency::Routine,
            "General Physician",
            "A light influenza-like illness. Symptoms of this kind usually settle \
             with rest and fluids within a few days.",
            &[
                "Take it easy for a couple of days",
                "Drink warm fluids regularly",
                "Check your temperature twice a day",
            ],
            "See a doctor if you are not improving after three days.",
        ),
    ]
});

// ═══════════════════════════════════════════════════════════
// Strategy
// ═══════════════════════════════════════════════════════════

/// Strategy backed by the built-in combination table. Also usable as a
/// synchronous library call through [`TableMatcher::lookup`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TableMatcher;

impl TableMatcher {
    pub fn new() -> Self {
        TableMatcher
    }

    /// Looks up a diagnosis for the given symptoms.
    ///
    /// Returns `None` only for empty input. Any non-empty set resolves,
    /// exactly from the table when the whole set matches a known
    /// combination, otherwise from the fallback rotation.
    pub fn lookup(&self, symptoms: &[String]) -> Option<Prediction> {
        let distinct = distinct_labels(symptoms);
        if distinct.is_empty() {
            return None;
        }
        if let Some(found) = KNOWN_COMBINATIONS.get(&canonical_key(symptoms)) {
            return Some(found.clone());
        }
        let rotation = &*FALLBACK_ROTATION;
        Some(rotation[distinct.len() % rotation.len()].clone())
    }
}

#[async_trait]
impl Predictor for TableMatcher {
    async fn predict(
        &self,
        symptoms: &[String],
        _cancel: &CancelToken,
    ) -> Result<Prediction, PredictionError> {
        self.lookup(symptoms).ok_or(PredictionError::EmptyInput)
    }

    fn mode(&self) -> EngineMode {
        EngineMode::Table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn known_combination_matches_in_any_order() {
        let matcher = TableMatcher::new();
        let orderings = [
            ["Fever", "Cough", "Cold"],
            ["Cold", "Cough", "Fever"],
            ["Cough", "Fever", "Cold"],
        ];
        for ordering in &orderings {
            let prediction = matcher.lookup(&labels(ordering)).unwrap();
            assert_eq!(prediction.disease, "Common Flu");
            assert_eq!(prediction.confidence, 87);
        }
    }

    #[test]
    fn match_requires_the_exact_set() {
        let matcher = TableMatcher::new();

        // Subset of a known combination misses the table.
        let subset = matcher.lookup(&labels(&["Fever", "Cough"])).unwrap();
        assert_ne!(subset.disease, "Common Flu");

        // Superset misses too.
        let superset = matcher
            .lookup(&labels(&["Fever", "Cough", "Cold", "Headache"]))
            .unwrap();
        assert_ne!(superset.disease, "Common Flu");
    }

    #[test]
    fn empty_input_returns_none() {
        assert!(TableMatcher::new().lookup(&[]).is_none());
    }

    #[test]
    fn fallback_depends_only_on_distinct_count() {
        let matcher = TableMatcher::new();

        // Two different unmatched 2-symptom sets land on the same record
        // (2 % 3 == 2, the third rotation entry).
        let first = matcher.lookup(&labels(&["Fever", "Vomiting"])).unwrap();
        let second = matcher.lookup(&labels(&["Cold", "Fatigue"])).unwrap();
        assert_eq!(first.disease, "Mild Flu");
        assert_eq!(second, first);

        // An unmatched 3-symptom set wraps to the first entry.
        let third = matcher
            .lookup(&labels(&["Cold", "Vomiting", "Chest Pain"]))
            .unwrap();
        assert_eq!(third.disease, "General Viral Infection");

        // Four distinct symptoms pick the second entry.
        let fourth = matcher
            .lookup(&labels(&["Cold", "Vomiting", "Chest Pain", "Cough"]))
            .unwrap();
        assert_eq!(fourth.disease, "Seasonal Allergy");
    }

    #[test]
    fn duplicates_do_not_change_the_outcome() {
        let matcher = TableMatcher::new();
        let plain = matcher.lookup(&labels(&["Headache", "Dizziness"])).unwrap();
        let doubled = matcher
            .lookup(&labels(&["Headache", "Dizziness", "Headache"]))
            .unwrap();
        assert_eq!(plain.disease, "Migraine");
        assert_eq!(doubled, plain);
    }

    #[test]
    fn unknown_labels_flow_through_to_the_fallback() {
        let prediction = TableMatcher::new()
            .lookup(&labels(&["Sore Throat", "Ringing Ears"]))
            .unwrap();
        assert_eq!(prediction.disease, "Mild Flu");
    }

    #[test]
    fn every_seed_record_passes_validation() {
        for prediction in KNOWN_COMBINATIONS.values() {
            assert!(
                prediction.validate().is_ok(),
                "invalid table record: {}",
                prediction.disease
            );
        }
        for prediction in FALLBACK_ROTATION.iter() {
            assert!(
                prediction.validate().is_ok(),
                "invalid fallback record: {}",
                prediction.disease
            );
        }
    }

    #[test]
    fn table_has_six_combinations_and_three_fallbacks() {
        assert_eq!(KNOWN_COMBINATIONS.len(), 6);
        assert_eq!(FALLBACK_ROTATION.len(), 3);
    }

    #[tokio::test]
    async fn predictor_impl_maps_empty_input_to_error() {
        let matcher = TableMatcher::new();
        let outcome = matcher.predict(&[], &CancelToken::new()).await;
        assert!(matches!(outcome, Err(PredictionError::EmptyInput)));
    }

    #[tokio::test]
    async fn predictor_impl_serves_table_hits() {
        let matcher = TableMatcher::new();
        let prediction = matcher
            .predict(&labels(&["Dizziness", "Chest Pain"]), &CancelToken::new())
            .await
            .unwrap();
        assert_eq!(prediction.disease, "Hypertension");
        assert_eq!(prediction.alternative_diagnoses.len(), 2);
        assert_eq!(matcher.mode(), EngineMode::Table);
    }
}
