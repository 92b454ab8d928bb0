use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::activity::{ActivityLabel, LABEL_COUNT, active_labels, label_order};

/// Per-label probability, indexed by `ActivityLabel::index`.
///
/// Values are each in [0, 1] but are not guaranteed to sum to 1: the mock
/// synthesizer leaves an unassigned residual in place rather than
/// renormalizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probabilities([f64; LABEL_COUNT]);

impl Probabilities {
    pub fn zeroed() -> Self {
        Self([0.0; LABEL_COUNT])
    }

    pub fn get(&self, label: ActivityLabel) -> f64 {
        self.0[label.index()]
    }

    pub fn set(&mut self, label: ActivityLabel, value: f64) {
        self.0[label.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActivityLabel, f64)> + '_ {
        label_order().iter().map(|&l| (l, self.0[l.index()]))
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// First label holding the maximum; `Idle` at -1 is the starting point,
    /// so an all-zero vector still yields its first entry.
    pub fn argmax(&self) -> (ActivityLabel, f64) {
        let mut best = ActivityLabel::Idle;
        let mut best_p = -1.0;
        for (label, p) in self.iter() {
            if p > best_p {
                best_p = p;
                best = label;
            }
        }
        (best, best_p)
    }

    /// Maps a classifier output vector onto labels in model class order.
    /// Entries beyond the twelve active classes are ignored; missing entries
    /// and `Idle` stay at 0.
    pub fn from_model_output(output: &[f32]) -> Self {
        let mut probs = Self::zeroed();
        for (label, &p) in active_labels().iter().zip(output.iter()) {
            probs.set(*label, f64::from(p));
        }
        probs
    }

    /// Labels sorted by descending probability, ties in enumeration order.
    pub fn ranked(&self) -> Vec<(ActivityLabel, f64)> {
        let mut out = self.iter().collect::<Vec<_>>();
        out.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        out
    }
}

impl Serialize for Probabilities {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let map = self.iter().collect::<BTreeMap<_, _>>();
        map.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Probabilities {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<ActivityLabel, f64>::deserialize(deserializer)?;
        let mut probs = Self::zeroed();
        for (label, p) in map {
            probs.set(label, p);
        }
        Ok(probs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub activity: ActivityLabel,
    pub confidence: f64,
    pub probabilities: Probabilities,
    pub timestamp: DateTime<Utc>,
}

impl PredictionResult {
    /// Builds a result whose label and confidence are the argmax of `probabilities`.
    pub fn from_probabilities(probabilities: Probabilities) -> Self {
        let (activity, confidence) = probabilities.argmax();
        Self {
            activity,
            confidence,
            probabilities,
            timestamp: Utc::now(),
        }
    }

    pub fn is_fall(&self) -> bool {
        self.activity == ActivityLabel::Fall
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/prediction.rs"]
mod tests;
