use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const LABEL_COUNT: usize = 13;
pub const ACTIVE_LABEL_COUNT: usize = 12;

/// Closed set of activity classes. Declaration order is the display order and
/// the order in which the classifier emits its output vector; `Idle` is last
/// and is never produced by the model itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityLabel {
    Boxing,
    Fall,
    Jump,
    LeftForerake,
    LeftHandWave,
    OpenArms,
    RightForerake,
    RightHandWave,
    Sit,
    Squat,
    Stand,
    Walk,
    Idle,
}

pub fn label_order() -> &'static [ActivityLabel; LABEL_COUNT] {
    &[
        ActivityLabel::Boxing,
        ActivityLabel::Fall,
        ActivityLabel::Jump,
        ActivityLabel::LeftForerake,
        ActivityLabel::LeftHandWave,
        ActivityLabel::OpenArms,
        ActivityLabel::RightForerake,
        ActivityLabel::RightHandWave,
        ActivityLabel::Sit,
        ActivityLabel::Squat,
        ActivityLabel::Stand,
        ActivityLabel::Walk,
        ActivityLabel::Idle,
    ]
}

/// The twelve labels the classifier can emit, in output-vector order.
pub fn active_labels() -> &'static [ActivityLabel] {
    &label_order()[..ACTIVE_LABEL_COUNT]
}

impl ActivityLabel {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_idle(self) -> bool {
        self == ActivityLabel::Idle
    }

    /// Dataset folder name used when the classifier was trained.
    pub fn key(self) -> &'static str {
        match self {
            ActivityLabel::Boxing => "box",
            ActivityLabel::Fall => "fall",
            ActivityLabel::Jump => "jump",
            ActivityLabel::LeftForerake => "left_forerake",
            ActivityLabel::LeftHandWave => "left_hand_wave",
            ActivityLabel::OpenArms => "open_arms",
            ActivityLabel::RightForerake => "right_forerake",
            ActivityLabel::RightHandWave => "right_hand_wave",
            ActivityLabel::Sit => "sit",
            ActivityLabel::Squat => "squat",
            ActivityLabel::Stand => "stand",
            ActivityLabel::Walk => "walk",
            ActivityLabel::Idle => "idle",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ActivityLabel::Boxing => "Boxing",
            ActivityLabel::Fall => "Fall",
            ActivityLabel::Jump => "Jump",
            ActivityLabel::LeftForerake => "Left forerake",
            ActivityLabel::LeftHandWave => "Left hand wave",
            ActivityLabel::OpenArms => "Open arms",
            ActivityLabel::RightForerake => "Right forerake",
            ActivityLabel::RightHandWave => "Right hand wave",
            ActivityLabel::Sit => "Sit",
            ActivityLabel::Squat => "Squat",
            ActivityLabel::Stand => "Stand",
            ActivityLabel::Walk => "Walk",
            ActivityLabel::Idle => "Unknown / idle",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ActivityLabel::Boxing => "#ec4899",
            ActivityLabel::Fall => "#ef4444",
            ActivityLabel::Jump => "#f59e0b",
            ActivityLabel::LeftForerake => "#8b5cf6",
            ActivityLabel::LeftHandWave => "#6366f1",
            ActivityLabel::OpenArms => "#14b8a6",
            ActivityLabel::RightForerake => "#a855f7",
            ActivityLabel::RightHandWave => "#3b82f6",
            ActivityLabel::Sit => "#10b981",
            ActivityLabel::Squat => "#f97316",
            ActivityLabel::Stand => "#06b6d4",
            ActivityLabel::Walk => "#22c55e",
            ActivityLabel::Idle => "#64748b",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ActivityLabel::Boxing => "Rapid limb extension and striking motion detected.",
            ActivityLabel::Fall => "Sudden acceleration and sharp height drop detected. Emergency!",
            ActivityLabel::Jump => "Pronounced vertical displacement detected.",
            ActivityLabel::LeftForerake => "Body leaning forward to the left detected.",
            ActivityLabel::LeftHandWave => "Left hand waving motion detected.",
            ActivityLabel::OpenArms => "Arms opening motion detected.",
            ActivityLabel::RightForerake => "Body leaning forward to the right detected.",
            ActivityLabel::RightHandWave => "Right hand waving motion detected.",
            ActivityLabel::Sit => "Sitting motion or seated posture detected.",
            ActivityLabel::Squat => "Squatting motion detected.",
            ActivityLabel::Stand => "Standing posture detected.",
            ActivityLabel::Walk => "Normal gait pattern detected.",
            ActivityLabel::Idle => "No significant human activity signal.",
        }
    }

    pub fn from_key(key: &str) -> Option<ActivityLabel> {
        label_order().iter().copied().find(|l| l.key() == key)
    }
}

impl fmt::Display for ActivityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown activity label: {}", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

impl FromStr for ActivityLabel {
    type Err = UnknownLabel;

    /// Accepts the dataset key (`left_hand_wave`), the variant name in any
    /// case (`LEFT_HAND_WAVE`, `LeftHandWave`) or `boxing` for `box`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        if let Some(label) = ActivityLabel::from_key(&norm) {
            return Ok(label);
        }
        let squashed = norm.replace('_', "");
        for &label in label_order() {
            let variant = format!("{label:?}").to_ascii_lowercase();
            if variant == squashed {
                return Ok(label);
            }
        }
        Err(UnknownLabel(s.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/activity.rs"]
mod tests;
