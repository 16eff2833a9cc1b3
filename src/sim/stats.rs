//! Flock summary for logging and debug overlays

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::flock::Flock;

/// Aggregate kinematics of a flock at one instant
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FlockStats {
    pub count: usize,
    pub time_ticks: u64,
    /// Mean position
    pub centroid: Vec3,
    pub mean_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_altitude: f32,
    pub max_altitude: f32,
}

impl FlockStats {
    /// Summarize `flock`; an empty flock yields zeros
    pub fn collect(flock: &Flock) -> Self {
        let agents = flock.agents();
        if agents.is_empty() {
            return Self {
                time_ticks: flock.time_ticks,
                ..Self::default()
            };
        }

        let mut stats = Self {
            count: agents.len(),
            time_ticks: flock.time_ticks,
            min_speed: f32::INFINITY,
            max_speed: f32::NEG_INFINITY,
            min_altitude: f32::INFINITY,
            max_altitude: f32::NEG_INFINITY,
            ..Self::default()
        };

        let mut speed_sum = 0.0;
        for agent in agents {
            let speed = agent.velocity.length();
            stats.centroid += agent.position;
            speed_sum += speed;
            stats.min_speed = stats.min_speed.min(speed);
            stats.max_speed = stats.max_speed.max(speed);
            stats.min_altitude = stats.min_altitude.min(agent.position.y);
            stats.max_altitude = stats.max_altitude.max(agent.position.y);
        }

        let n = agents.len() as f32;
        stats.centroid /= n;
        stats.mean_speed = speed_sum / n;
        stats
    }
}
