use rand::Rng;

use crate::model::activity::ActivityLabel;
use crate::model::point::RadarPoint;

/// Motion parameters driving the point generator for one activity group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    pub num_points: usize,
    pub velocity_base: f64,
    pub spread_x: f64,
    pub spread_y: f64,
}

const DEFAULT_SPREAD: f64 = 0.5;

pub fn motion_profile(label: ActivityLabel) -> MotionProfile {
    match label {
        ActivityLabel::Boxing
        | ActivityLabel::Jump
        | ActivityLabel::OpenArms
        | ActivityLabel::LeftHandWave
        | ActivityLabel::RightHandWave => MotionProfile {
            num_points: 60,
            velocity_base: 2.0,
            spread_x: 1.2,
            spread_y: DEFAULT_SPREAD,
        },
        ActivityLabel::Fall => MotionProfile {
            num_points: 40,
            velocity_base: 3.0,
            spread_x: 1.5,
            spread_y: DEFAULT_SPREAD,
        },
        ActivityLabel::Sit
        | ActivityLabel::Stand
        | ActivityLabel::LeftForerake
        | ActivityLabel::RightForerake => MotionProfile {
            num_points: 15,
            velocity_base: 0.1,
            spread_x: 0.3,
            spread_y: 0.3,
        },
        ActivityLabel::Walk | ActivityLabel::Squat | ActivityLabel::Idle => MotionProfile {
            num_points: 30,
            velocity_base: 1.0,
            spread_x: DEFAULT_SPREAD,
            spread_y: DEFAULT_SPREAD,
        },
    }
}

/// Generates a fresh point cloud for `label`. Every call draws new points;
/// nothing carries over between scans.
pub fn synthesize_points<R: Rng + ?Sized>(label: ActivityLabel, rng: &mut R) -> Vec<RadarPoint> {
    let profile = motion_profile(label);
    let mut points = Vec::with_capacity(profile.num_points);
    for _ in 0..profile.num_points {
        points.push(RadarPoint {
            x: uniform(rng, -profile.spread_x, profile.spread_x),
            y: uniform(rng, 0.5, profile.spread_y + 2.0),
            z: uniform(rng, 0.0, 2.0),
            velocity: uniform(
                rng,
                profile.velocity_base * 0.5,
                profile.velocity_base * 1.5,
            ),
            intensity: uniform(rng, 0.5, 1.0),
        });
    }
    points
}

// Half-open [min, max); degenerate ranges collapse to `min`.
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

#[cfg(test)]
#[path = "../../tests/src_inline/synth/points.rs"]
mod tests;
