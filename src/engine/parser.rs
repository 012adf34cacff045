//! Turns raw gateway text into a validated [`Prediction`].

use crate::engine::PredictionError;
use crate::models::Prediction;

/// Removes markdown code fences a model may wrap around its JSON.
/// Every ```` ```json ```` opener and every bare ```` ``` ```` is
/// dropped, then the remainder is trimmed.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Strict parse of a gateway reply.
///
/// The reply must be the prediction object itself, optionally fenced.
/// Unknown fields, wrong types, out-of-range values and missing keys
/// all fail, and the raw text travels with the error for logging.
pub fn parse_prediction(raw: &str) -> Result<Prediction, PredictionError> {
    let cleaned = strip_code_fences(raw);
    let prediction: Prediction =
        serde_json::from_str(&cleaned).map_err(|e| PredictionError::MalformedResponse {
            reason: e.to_string(),
            raw: raw.to_string(),
        })?;
    prediction
        .validate()
        .map_err(|reason| PredictionError::MalformedResponse {
            reason,
            raw: raw.to_string(),
        })?;
    Ok(prediction)
}
