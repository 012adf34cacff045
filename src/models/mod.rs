//! Data types shared by the engine, history and API layers.

pub mod prediction;

pub use prediction::{AlternativeDiagnosis, Prediction, Severity, Urgency};
