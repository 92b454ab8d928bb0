use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::activity::{ActivityLabel, active_labels, label_order};
use crate::model::prediction::{PredictionResult, Probabilities};
use crate::synth::points::uniform;

pub const CONFIDENCE_MIN: f64 = 0.75;
pub const CONFIDENCE_MAX: f64 = 0.98;
pub const NOISE_MAX: f64 = 0.05;

/// Produces a softmax-like distribution with most of the mass on the forced
/// label, or on a uniformly chosen active label when none is forced.
///
/// Every other label, in enumeration order, receives
/// `min(remaining, U(0, 0.05))` out of a budget of `1 - confidence`. Once the
/// budget is spent later labels get exactly 0. The leftover budget is not
/// redistributed, so the total is at most 1 and usually below it.
pub fn synthesize_prediction<R: Rng + ?Sized>(
    forced: Option<ActivityLabel>,
    rng: &mut R,
) -> PredictionResult {
    let activity = match forced {
        Some(label) => label,
        None => pick_active_label(rng),
    };

    let confidence = uniform(rng, CONFIDENCE_MIN, CONFIDENCE_MAX);
    let mut probabilities = Probabilities::zeroed();
    probabilities.set(activity, confidence);

    let mut remaining = 1.0 - confidence;
    for &label in label_order() {
        if label == activity {
            continue;
        }
        let p = remaining.min(uniform(rng, 0.0, NOISE_MAX)).max(0.0);
        probabilities.set(label, p);
        remaining -= p;
    }

    PredictionResult {
        activity,
        confidence,
        probabilities,
        timestamp: chrono::Utc::now(),
    }
}

fn pick_active_label<R: Rng + ?Sized>(rng: &mut R) -> ActivityLabel {
    // active_labels() is a non-empty constant slice
    active_labels()
        .choose(rng)
        .copied()
        .unwrap_or(ActivityLabel::Walk)
}

#[cfg(test)]
#[path = "../../tests/src_inline/synth/probabilities.rs"]
mod tests;
