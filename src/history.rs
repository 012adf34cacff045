//! Bounded in-memory record of served predictions.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Prediction;

/// How many entries the history keeps. Older ones fall off.
pub const HISTORY_CAP: usize = 10;

/// One served prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub symptoms: Vec<String>,
    pub prediction: Prediction,
    pub predicted_at: DateTime<Utc>,
}

/// FIFO history capped at [`HISTORY_CAP`] entries. Only successful
/// predictions are recorded; failures never enter the history.
#[derive(Debug, Clone)]
pub struct RunHistory {
    entries: VecDeque<HistoryEntry>,
    cap: usize,
}

impl RunHistory {
    pub fn new() -> Self {
        Self::with_cap(HISTORY_CAP)
    }

    pub fn with_cap(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Appends a served prediction, evicting the oldest entry once the
    /// cap is exceeded. Returns the new entry's id.
    pub fn record(&mut self, symptoms: Vec<String>, prediction: Prediction) -> Uuid {
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            symptoms,
            prediction,
            predicted_at: Utc::now(),
        };
        let id = entry.id;
        self.entries.push_back(entry);
        while self.entries.len() > self.cap {
            self.entries.pop_front();
        }
        id
    }

    /// Entries newest first.
    pub fn recent(&self) -> Vec<HistoryEntry> {
        self.entries.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RunHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    fn prediction(disease: &str) -> Prediction {
        Prediction {
            disease: disease.to_string(),
            confidence: 70,
            severity: Severity::Low,
            description: "test".to_string(),
            tips: vec!["rest".to_string()],
            specialist: "General Physician".to_string(),
            alternative_diagnoses: Vec::new(),
            urgency: None,
            when_to_see_doctor: None,
        }
    }

    #[test]
    fn records_and_reads_newest_first() {
        let mut history = RunHistory::new();
        history.record(vec!["Fever".to_string()], prediction("First"));
        history.record(vec!["Cough".to_string()], prediction("Second"));

        let recent = history.recent();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].prediction.disease, "Second");
        assert_eq!(recent[1].prediction.disease, "First");
    }

    #[test]
    fn evicts_oldest_beyond_the_cap() {
        let mut history = RunHistory::new();
        for i in 0..12 {
            history.record(vec![format!("S{i}")], prediction(&format!("D{i}")));
        }

        assert_eq!(history.len(), HISTORY_CAP);
        let recent = history.recent();
        assert_eq!(recent[0].symptoms, vec!["S11".to_string()]);
        assert_eq!(recent[9].symptoms, vec!["S2".to_string()]);
        // The two oldest entries are gone.
        assert!(!recent.iter().any(|e| e.symptoms == vec!["S0".to_string()]));
        assert!(!recent.iter().any(|e| e.symptoms == vec!["S1".to_string()]));
    }

    #[test]
    fn custom_cap_is_respected() {
        let mut history = RunHistory::with_cap(2);
        for i in 0..5 {
            history.record(vec![format!("S{i}")], prediction("X"));
        }
        assert_eq!(history.len(), 2);
        assert_eq!(history.recent()[0].symptoms, vec!["S4".to_string()]);
    }

    #[test]
    fn entry_ids_are_unique() {
        let mut history = RunHistory::new();
        let a = history.record(vec!["Fever".to_string()], prediction("A"));
        let b = history.record(vec!["Fever".to_string()], prediction("B"));
        assert_ne!(a, b);
    }

    #[test]
    fn starts_empty() {
        let history = RunHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert!(history.recent().is_empty());
    }
}
