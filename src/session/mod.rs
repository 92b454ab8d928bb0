pub mod command;
pub mod runner;

use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use crate::inference::RealClassification;
use crate::model::activity::ActivityLabel;
use crate::model::history::History;
use crate::model::point::RadarPoint;
use crate::model::prediction::PredictionResult;
use crate::synth::{synthesize_points, synthesize_prediction};

pub use command::OperatorCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    Mock,
    Model,
}

/// What one classification step published.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub source: PredictionSource,
    pub prediction: PredictionResult,
    pub points: Vec<RadarPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemStatus {
    pub state: LoopState,
    pub model_loaded: bool,
    pub forced: Option<ActivityLabel>,
    pub fps: f64,
    pub history_len: usize,
    pub current: Option<ActivityLabel>,
}

/// Orchestration state: loop state, forced label, the published prediction
/// and point cloud, and the bounded history. Only this type mutates history.
#[derive(Debug)]
pub struct Session<R: Rng> {
    state: LoopState,
    forced: Option<ActivityLabel>,
    current: Option<PredictionResult>,
    points: Vec<RadarPoint>,
    history: History,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(history_capacity: usize, rng: R) -> Self {
        Self {
            state: LoopState::Idle,
            forced: None,
            current: None,
            points: Vec::new(),
            history: History::with_capacity(history_capacity),
            rng,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn start(&mut self) -> bool {
        if self.state == LoopState::Running {
            return false;
        }
        self.state = LoopState::Running;
        info!("classification loop running");
        true
    }

    pub fn stop(&mut self) -> bool {
        if self.state == LoopState::Idle {
            return false;
        }
        self.state = LoopState::Idle;
        info!("classification loop paused");
        true
    }

    pub fn toggle(&mut self) -> LoopState {
        match self.state {
            LoopState::Idle => self.start(),
            LoopState::Running => self.stop(),
        };
        self.state
    }

    pub fn forced(&self) -> Option<ActivityLabel> {
        self.forced
    }

    /// Takes effect from the next tick on.
    pub fn set_forced(&mut self, forced: Option<ActivityLabel>) {
        if self.forced != forced {
            match forced {
                Some(label) => info!("forced activity set to {}", label.key()),
                None => info!("forced activity cleared"),
            }
        }
        self.forced = forced;
    }

    /// Selecting the already forced label clears it.
    pub fn toggle_forced(&mut self, label: ActivityLabel) -> Option<ActivityLabel> {
        let next = if self.forced == Some(label) {
            None
        } else {
            Some(label)
        };
        self.set_forced(next);
        next
    }

    pub fn current(&self) -> Option<&PredictionResult> {
        self.current.as_ref()
    }

    pub fn points(&self) -> &[RadarPoint] {
        &self.points
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// One periodic step: mock prediction, point cloud for its label,
    /// history append. Does nothing while idle.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if !self.is_running() {
            return None;
        }
        let prediction = synthesize_prediction(self.forced, &mut self.rng);
        Some(self.publish(PredictionSource::Mock, prediction))
    }

    /// Publishes a successful real-sample classification the same way a
    /// mock tick is published. Allowed in either loop state.
    pub fn apply_real(&mut self, result: &RealClassification) -> TickOutcome {
        self.publish(PredictionSource::Model, result.prediction.clone())
    }

    fn publish(&mut self, source: PredictionSource, prediction: PredictionResult) -> TickOutcome {
        let points = synthesize_points(prediction.activity, &mut self.rng);
        if prediction.is_fall() {
            warn!(
                "fall detected (confidence {:.1}%)",
                prediction.confidence * 100.0
            );
        }
        self.history.push(prediction.clone());
        self.current = Some(prediction.clone());
        self.points = points.clone();
        TickOutcome {
            source,
            prediction,
            points,
        }
    }

    pub fn status(&self, model_loaded: bool, fps: f64) -> SystemStatus {
        SystemStatus {
            state: self.state,
            model_loaded,
            forced: self.forced,
            fps,
            history_len: self.history.len(),
            current: self.current.as_ref().map(|p| p.activity),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/session/session.rs"]
mod tests;
