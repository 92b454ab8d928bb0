use crate::inference::RealClassification;
use crate::model::activity::{ActivityLabel, label_order};
use crate::model::history::History;
use crate::model::point::summarize_cloud;
use crate::model::prediction::PredictionResult;
use crate::report::format_percent;
use crate::session::{LoopState, PredictionSource, SystemStatus, TickOutcome};

const BAR_WIDTH: usize = 24;

pub fn render_tick(outcome: &TickOutcome) -> String {
    let p = &outcome.prediction;
    let cloud = summarize_cloud(&outcome.points);
    let ranked = p.probabilities.ranked();
    let runner_up = ranked
        .get(1)
        .map(|(label, v)| format!("{} {}", label.key(), format_percent(*v, 1)))
        .unwrap_or_default();
    let mut out = format!(
        "[{}] {:<7} {:<16} {:>6}  next={:<20} mass={:.3} points={} v_mean={:.2} v_max={:.2} z_mean={:.2}",
        p.timestamp.format("%H:%M:%S%.3f"),
        source_tag(outcome.source),
        p.activity.display_name(),
        format_percent(p.confidence, 1),
        runner_up,
        p.probabilities.total(),
        cloud.count,
        cloud.mean_velocity,
        cloud.max_velocity,
        cloud.mean_height,
    );
    if p.is_fall() {
        out.push_str("  *** FALL DETECTED ***");
    }
    out
}

pub fn render_real_result(result: &RealClassification, outcome: &TickOutcome) -> String {
    let p = &result.prediction;
    let mut out = String::new();
    out.push_str("Inference complete\n");
    out.push_str(&format!("Result: {} ({})\n", p.activity.display_name(), p.activity.key()));
    out.push_str(&format!("Confidence: {}\n", format_percent(p.confidence, 2)));
    if let Some(truth) = result.ground_truth {
        let verdict = if truth == p.activity { "match" } else { "mismatch" };
        out.push_str(&format!("Ground truth: {} ({})\n", truth.key(), verdict));
    }
    out.push_str(&format!("Description: {}\n", p.activity.description()));
    out.push_str(&format!("Simulated points: {}\n", outcome.points.len()));
    out.push_str(&render_distribution(p));
    if p.is_fall() {
        out.push_str("\n*** FALL DETECTED ***");
    }
    out
}

/// Horizontal bar chart of the full distribution in display order.
pub fn render_distribution(p: &PredictionResult) -> String {
    let mut out = String::new();
    for &label in label_order() {
        let v = p.probabilities.get(label).clamp(0.0, 1.0);
        let filled = (v * BAR_WIDTH as f64).round() as usize;
        out.push_str(&format!(
            "  {:<16} {:<width$} {:>7}\n",
            label.display_name(),
            "#".repeat(filled),
            format_percent(v, 2),
            width = BAR_WIDTH,
        ));
    }
    out.pop();
    out
}

pub fn render_status(status: &SystemStatus) -> String {
    let state = match status.state {
        LoopState::Idle => "idle",
        LoopState::Running => "running",
    };
    let forced = status.forced.map(ActivityLabel::key).unwrap_or("none");
    let current = status.current.map(ActivityLabel::key).unwrap_or("waiting");
    format!(
        "loop={} model={} forced={} fps={:.1} history={} current={}",
        state,
        if status.model_loaded { "loaded" } else { "not loaded" },
        forced,
        status.fps,
        status.history_len,
        current
    )
}

pub fn render_history(history: &History) -> String {
    if history.is_empty() {
        return "(no history)".to_string();
    }
    let mut out = String::new();
    for (idx, p) in history.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {} {:<16} {:>4}\n",
            idx + 1,
            p.timestamp.format("%H:%M:%S%.1f"),
            p.activity.display_name(),
            format_percent(p.confidence, 0),
        ));
    }
    out.pop();
    out
}

pub fn render_labels() -> String {
    let mut out = String::new();
    for &label in label_order() {
        out.push_str(&format!(
            "{:<16} {:<16} {}  {}\n",
            label.key(),
            label.display_name(),
            label.color(),
            label.description()
        ));
    }
    out.pop();
    out
}

fn source_tag(source: PredictionSource) -> &'static str {
    match source {
        PredictionSource::Mock => "mock",
        PredictionSource::Model => "model",
    }
}
