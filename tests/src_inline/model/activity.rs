use super::*;

#[test]
fn test_label_order_is_closed_and_idle_last() {
    let order = label_order();
    assert_eq!(order.len(), LABEL_COUNT);
    assert_eq!(order[LABEL_COUNT - 1], ActivityLabel::Idle);
    for (idx, label) in order.iter().enumerate() {
        assert_eq!(label.index(), idx);
    }
}

#[test]
fn test_active_labels_exclude_idle() {
    let active = active_labels();
    assert_eq!(active.len(), ACTIVE_LABEL_COUNT);
    assert!(!active.contains(&ActivityLabel::Idle));
    assert_eq!(active[0], ActivityLabel::Boxing);
    assert_eq!(active[11], ActivityLabel::Walk);
}

#[test]
fn test_keys_round_trip() {
    for &label in label_order() {
        assert_eq!(ActivityLabel::from_key(label.key()), Some(label));
    }
    assert_eq!(ActivityLabel::from_key("boxing"), None);
}

#[test]
fn test_parse_accepts_keys_and_variant_names() {
    assert_eq!("fall".parse::<ActivityLabel>().unwrap(), ActivityLabel::Fall);
    assert_eq!("FALL".parse::<ActivityLabel>().unwrap(), ActivityLabel::Fall);
    assert_eq!("box".parse::<ActivityLabel>().unwrap(), ActivityLabel::Boxing);
    assert_eq!("Boxing".parse::<ActivityLabel>().unwrap(), ActivityLabel::Boxing);
    assert_eq!(
        "LEFT_HAND_WAVE".parse::<ActivityLabel>().unwrap(),
        ActivityLabel::LeftHandWave
    );
    assert_eq!(
        "right-forerake".parse::<ActivityLabel>().unwrap(),
        ActivityLabel::RightForerake
    );
    assert!("cartwheel".parse::<ActivityLabel>().is_err());
}

#[test]
fn test_serde_uses_screaming_names() {
    let json = serde_json::to_string(&ActivityLabel::OpenArms).unwrap();
    assert_eq!(json, "\"OPEN_ARMS\"");
    let back: ActivityLabel = serde_json::from_str("\"RIGHT_HAND_WAVE\"").unwrap();
    assert_eq!(back, ActivityLabel::RightHandWave);
}

#[test]
fn test_metadata_present_for_every_label() {
    for &label in label_order() {
        assert!(label.color().starts_with('#'));
        assert_eq!(label.color().len(), 7);
        assert!(!label.description().is_empty());
        assert!(!label.display_name().is_empty());
    }
}
