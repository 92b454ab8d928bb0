use serde::Serialize;

use crate::inference::RealClassification;
use crate::model::activity::ActivityLabel;
use crate::model::history::History;
use crate::model::point::{CloudSummary, RadarPoint, summarize_cloud};
use crate::model::prediction::PredictionResult;
use crate::session::{PredictionSource, SystemStatus, TickOutcome};

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Record<'a> {
    Tick {
        source: PredictionSource,
        prediction: &'a PredictionResult,
        cloud: CloudSummary,
        points: &'a [RadarPoint],
    },
    RealResult {
        prediction: &'a PredictionResult,
        ground_truth: Option<ActivityLabel>,
        cloud: CloudSummary,
    },
    Notice {
        message: &'a str,
    },
    Status {
        #[serde(flatten)]
        status: &'a SystemStatus,
    },
    History {
        entries: Vec<&'a PredictionResult>,
    },
}

fn to_line(record: &Record<'_>) -> std::io::Result<String> {
    serde_json::to_string(record).map_err(std::io::Error::other)
}

pub fn render_tick(outcome: &TickOutcome) -> std::io::Result<String> {
    to_line(&Record::Tick {
        source: outcome.source,
        prediction: &outcome.prediction,
        cloud: summarize_cloud(&outcome.points),
        points: &outcome.points,
    })
}

pub fn render_real_result(
    result: &RealClassification,
    outcome: &TickOutcome,
) -> std::io::Result<String> {
    to_line(&Record::RealResult {
        prediction: &result.prediction,
        ground_truth: result.ground_truth,
        cloud: summarize_cloud(&outcome.points),
    })
}

pub fn render_notice(message: &str) -> std::io::Result<String> {
    to_line(&Record::Notice { message })
}

pub fn render_status(status: &SystemStatus) -> std::io::Result<String> {
    to_line(&Record::Status { status })
}

pub fn render_history(history: &History) -> std::io::Result<String> {
    to_line(&Record::History {
        entries: history.iter().collect(),
    })
}
