use serde::{Deserialize, Serialize};

/// How hard the predicted condition hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Moderate,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How soon care should be sought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Routine,
    Soon,
    Urgent,
    Emergency,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Routine => "routine",
            Urgency::Soon => "soon",
            Urgency::Urgent => "urgent",
            Urgency::Emergency => "emergency",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A runner-up condition listed alongside the primary prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlternativeDiagnosis {
    pub disease: String,
    pub confidence: u8,
}

/// A diagnosis prediction, serialized exactly as it crosses the wire.
///
/// Unknown keys are rejected on deserialization; this struct doubles as
/// the schema check for gateway replies. Optional fields drop out of the
/// serialized form when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Prediction {
    pub disease: String,
    pub confidence: u8,
    pub severity: Severity,
    pub description: String,
    pub tips: Vec<String>,
    pub specialist: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_diagnoses: Vec<AlternativeDiagnosis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when_to_see_doctor: Option<String>,
}

impl Prediction {
    /// Checks the constraints serde cannot express. First violation wins.
    pub fn validate(&self) -> Result<(), String> {
        if self.disease.trim().is_empty() {
            return Err("disease must not be empty".to_string());
        }
        if self.confidence > 100 {
            return Err(format!(
                "confidence {} is outside 0-100",
                self.confidence
            ));
        }
        if self.tips.is_empty() {
            return Err("tips must contain at least one entry".to_string());
        }
        if self.specialist.trim().is_empty() {
            return Err("specialist must not be empty".to_string());
        }
        for alternative in &self.alternative_diagnoses {
            if alternative.disease.trim().is_empty() {
                return Err("alternative diagnosis name must not be empty".to_string());
            }
            if alternative.confidence > 100 {
                return Err(format!(
                    "alternative diagnosis confidence {} is outside 0-100",
                    alternative.confidence
                ));
            }
        }
        Ok(())
    }
}
