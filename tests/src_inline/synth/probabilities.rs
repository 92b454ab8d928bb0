use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::synth::points::synthesize_points;

#[test]
fn test_forced_label_carries_confidence() {
    let mut rng = StdRng::seed_from_u64(5);
    for &label in active_labels() {
        for _ in 0..20 {
            let p = synthesize_prediction(Some(label), &mut rng);
            assert_eq!(p.activity, label);
            assert!(p.confidence >= CONFIDENCE_MIN && p.confidence <= CONFIDENCE_MAX);
            assert_eq!(p.probabilities.get(label), p.confidence);
        }
    }
}

#[test]
fn test_unforced_never_picks_idle() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut tally = [0usize; 13];
    for _ in 0..1000 {
        let p = synthesize_prediction(None, &mut rng);
        tally[p.activity.index()] += 1;
    }
    assert_eq!(tally[ActivityLabel::Idle.index()], 0);
    // every active label should show up over 1000 draws
    for &label in active_labels() {
        assert!(tally[label.index()] > 0, "{label:?} never chosen");
    }
}

#[test]
fn test_mass_is_not_renormalized() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut below_one = 0;
    for _ in 0..500 {
        let p = synthesize_prediction(None, &mut rng);
        let total = p.probabilities.total();
        assert!(total <= 1.0 + 1e-9);
        if total < 1.0 - 1e-9 {
            below_one += 1;
        }
    }
    assert!(below_one > 0);
}

#[test]
fn test_noise_stops_once_budget_is_spent() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..200 {
        let p = synthesize_prediction(Some(ActivityLabel::Walk), &mut rng);
        let mut remaining = 1.0 - p.confidence;
        let mut exhausted = false;
        for (label, v) in p.probabilities.iter() {
            if label == ActivityLabel::Walk {
                continue;
            }
            assert!(v <= NOISE_MAX);
            if exhausted {
                assert_eq!(v, 0.0);
            }
            remaining -= v;
            if remaining <= 0.0 {
                exhausted = true;
            }
        }
    }
}

#[test]
fn test_forced_idle_is_honoured() {
    let mut rng = StdRng::seed_from_u64(2);
    let p = synthesize_prediction(Some(ActivityLabel::Idle), &mut rng);
    assert_eq!(p.activity, ActivityLabel::Idle);
}

#[test]
fn test_forced_fall_scenario() {
    let mut rng = StdRng::seed_from_u64(8);
    let p = synthesize_prediction(Some(ActivityLabel::Fall), &mut rng);
    assert_eq!(p.activity, ActivityLabel::Fall);
    let points = synthesize_points(p.activity, &mut rng);
    assert_eq!(points.len(), 40);
    let mut history = crate::model::history::History::default();
    history.push(p);
    assert_eq!(history.len(), 1);
    assert_eq!(history.latest().unwrap().activity, ActivityLabel::Fall);
}

proptest! {
    #[test]
    fn prop_distribution_covers_every_label(seed in any::<u64>(), forced in proptest::option::of(0usize..13)) {
        let mut rng = StdRng::seed_from_u64(seed);
        let forced = forced.map(|i| label_order()[i]);
        let p = synthesize_prediction(forced, &mut rng);
        if let Some(label) = forced {
            prop_assert_eq!(p.activity, label);
        } else {
            prop_assert!(!p.activity.is_idle());
        }
        prop_assert_eq!(p.probabilities.iter().count(), 13);
        for (_, v) in p.probabilities.iter() {
            prop_assert!((0.0..=1.0).contains(&v));
        }
        prop_assert_eq!(p.probabilities.get(p.activity), p.confidence);
        prop_assert!(p.probabilities.total() <= 1.0 + 1e-9);
    }
}
