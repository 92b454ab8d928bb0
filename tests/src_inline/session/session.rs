use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::model::prediction::Probabilities;
use crate::session::command::CommandError;

fn session() -> Session<StdRng> {
    Session::new(50, StdRng::seed_from_u64(1234))
}

fn real(label: ActivityLabel) -> RealClassification {
    let mut probs = Probabilities::zeroed();
    probs.set(label, 0.9);
    RealClassification {
        prediction: PredictionResult {
            activity: label,
            confidence: 0.9,
            probabilities: probs,
            timestamp: Utc::now(),
        },
        ground_truth: None,
    }
}

#[test]
fn test_idle_session_does_not_tick() {
    let mut s = session();
    assert_eq!(s.state(), LoopState::Idle);
    assert!(s.tick().is_none());
    assert!(s.history().is_empty());
    assert!(s.current().is_none());
}

#[test]
fn test_toggle_switches_state() {
    let mut s = session();
    assert_eq!(s.toggle(), LoopState::Running);
    assert!(!s.start());
    assert_eq!(s.toggle(), LoopState::Idle);
    assert!(!s.stop());
}

#[test]
fn test_forced_fall_tick_publishes_everything() {
    let mut s = session();
    s.set_forced(Some(ActivityLabel::Fall));
    s.start();
    let outcome = s.tick().unwrap();
    assert_eq!(outcome.source, PredictionSource::Mock);
    assert_eq!(outcome.prediction.activity, ActivityLabel::Fall);
    assert_eq!(outcome.points.len(), 40);
    assert_eq!(s.history().len(), 1);
    assert_eq!(s.history().latest().unwrap().activity, ActivityLabel::Fall);
    assert_eq!(s.current().unwrap().activity, ActivityLabel::Fall);
    assert_eq!(s.points().len(), 40);
}

#[test]
fn test_forced_mode_applies_from_next_tick() {
    let mut s = session();
    s.start();
    s.set_forced(Some(ActivityLabel::Sit));
    let first = s.tick().unwrap();
    assert_eq!(first.prediction.activity, ActivityLabel::Sit);
    assert_eq!(first.points.len(), 15);
    s.set_forced(None);
    // earlier entries are untouched by the change
    assert_eq!(s.history().latest().unwrap().activity, ActivityLabel::Sit);
    for _ in 0..50 {
        let o = s.tick().unwrap();
        assert!(!o.prediction.activity.is_idle());
    }
}

#[test]
fn test_toggle_forced_clears_on_reselect() {
    let mut s = session();
    assert_eq!(s.toggle_forced(ActivityLabel::Jump), Some(ActivityLabel::Jump));
    assert_eq!(s.toggle_forced(ActivityLabel::Walk), Some(ActivityLabel::Walk));
    assert_eq!(s.toggle_forced(ActivityLabel::Walk), None);
    assert_eq!(s.forced(), None);
}

#[test]
fn test_history_trimmed_while_running() {
    let mut s = session();
    s.start();
    for _ in 0..60 {
        s.tick();
    }
    assert_eq!(s.history().len(), 50);
}

#[test]
fn test_apply_real_publishes_even_when_idle() {
    let mut s = session();
    let outcome = s.apply_real(&real(ActivityLabel::Boxing));
    assert_eq!(outcome.source, PredictionSource::Model);
    assert_eq!(outcome.points.len(), 60);
    assert_eq!(s.history().len(), 1);
    assert_eq!(s.current().unwrap().activity, ActivityLabel::Boxing);
    assert_eq!(s.state(), LoopState::Idle);
}

#[test]
fn test_status_reflects_session() {
    let mut s = session();
    s.set_forced(Some(ActivityLabel::Squat));
    s.start();
    s.tick();
    let st = s.status(true, 5.0);
    assert_eq!(st.state, LoopState::Running);
    assert!(st.model_loaded);
    assert_eq!(st.forced, Some(ActivityLabel::Squat));
    assert_eq!(st.history_len, 1);
    assert_eq!(st.current, Some(ActivityLabel::Squat));
}

#[test]
fn test_parse_operator_commands() {
    assert_eq!("start".parse::<OperatorCommand>(), Ok(OperatorCommand::Start));
    assert_eq!("PAUSE".parse::<OperatorCommand>(), Ok(OperatorCommand::Stop));
    assert_eq!(
        "force left hand wave".parse::<OperatorCommand>(),
        Ok(OperatorCommand::Force(ActivityLabel::LeftHandWave))
    );
    assert_eq!(
        "force FALL".parse::<OperatorCommand>(),
        Ok(OperatorCommand::Force(ActivityLabel::Fall))
    );
    assert_eq!("force".parse::<OperatorCommand>(), Err(CommandError::MissingLabel));
    assert!(matches!(
        "force moonwalk".parse::<OperatorCommand>(),
        Err(CommandError::BadLabel(_))
    ));
    assert!(matches!("dance".parse::<OperatorCommand>(), Err(CommandError::Unknown(_))));
    assert_eq!("   ".parse::<OperatorCommand>(), Err(CommandError::Empty));
}
