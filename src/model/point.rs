use serde::{Deserialize, Serialize};

/// One simulated radar reflection. Positions in meters: `x` lateral, `y`
/// forward distance, `z` height. `velocity` is the Doppler magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub velocity: f64,
    pub intensity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CloudSummary {
    pub count: usize,
    pub mean_velocity: f64,
    pub max_velocity: f64,
    pub mean_height: f64,
    pub lateral_extent: f64,
}

pub fn summarize_cloud(points: &[RadarPoint]) -> CloudSummary {
    if points.is_empty() {
        return CloudSummary {
            count: 0,
            mean_velocity: 0.0,
            max_velocity: 0.0,
            mean_height: 0.0,
            lateral_extent: 0.0,
        };
    }
    let n = points.len() as f64;
    let mut vel_sum = 0.0;
    let mut vel_max = 0.0f64;
    let mut z_sum = 0.0;
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    for p in points {
        vel_sum += p.velocity;
        vel_max = vel_max.max(p.velocity);
        z_sum += p.z;
        x_min = x_min.min(p.x);
        x_max = x_max.max(p.x);
    }
    CloudSummary {
        count: points.len(),
        mean_velocity: vel_sum / n,
        max_velocity: vel_max,
        mean_height: z_sum / n,
        lateral_extent: x_max - x_min,
    }
}
