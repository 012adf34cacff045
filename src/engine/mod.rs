//! Prediction engine.
//!
//! Two interchangeable strategies produce a [`Prediction`] from a list
//! of symptom labels: [`TableMatcher`] resolves offline against a fixed
//! combination table, [`GatewayPredictor`] delegates to an AI gateway.
//! One strategy is chosen at startup and serves every request.

pub mod cancel;
pub mod canonical;
pub mod gateway;
pub mod parser;
pub mod prompt;
pub mod table;

pub use cancel::CancelToken;
pub use gateway::{GatewayClient, GatewayPredictor};
pub use table::TableMatcher;

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::models::Prediction;

/// Why a prediction attempt failed. Every attempt is exactly one try;
/// retrying is the caller's decision.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PredictionError {
    #[error("no symptoms provided")]
    EmptyInput,
    #[error("gateway rate limit hit")]
    RateLimited,
    #[error("gateway usage quota exhausted")]
    QuotaExceeded,
    #[error("gateway returned status {status}")]
    Upstream { status: u16, body: String },
    #[error("no response from gateway: {0}")]
    Transport(String),
    #[error("unusable gateway reply: {reason}")]
    MalformedResponse { reason: String, raw: String },
    #[error("prediction cancelled")]
    Cancelled,
}

/// Which strategy an engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMode {
    Table,
    Gateway,
}

impl EngineMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineMode::Table => "table",
            EngineMode::Gateway => "gateway",
        }
    }
}

impl std::fmt::Display for EngineMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A prediction strategy.
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Predicts a diagnosis for the given symptom labels.
    ///
    /// Empty input fails with [`PredictionError::EmptyInput`] before any
    /// other work. The token belongs to this call alone; cancelling it
    /// never touches other in-flight predictions.
    async fn predict(
        &self,
        symptoms: &[String],
        cancel: &CancelToken,
    ) -> Result<Prediction, PredictionError>;

    fn mode(&self) -> EngineMode;
}

/// Scripted engine for tests: returns a fixed outcome and counts calls.
pub struct MockPredictor {
    outcome: Result<Prediction, PredictionError>,
    calls: AtomicUsize,
}

impl MockPredictor {
    pub fn returning(prediction: Prediction) -> Self {
        Self {
            outcome: Ok(prediction),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: PredictionError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Predictor for MockPredictor {
    async fn predict(
        &self,
        symptoms: &[String],
        _cancel: &CancelToken,
    ) -> Result<Prediction, PredictionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if symptoms.is_empty() {
            return Err(PredictionError::EmptyInput);
        }
        self.outcome.clone()
    }

    fn mode(&self) -> EngineMode {
        EngineMode::Table
    }
}
