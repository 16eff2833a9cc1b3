//! Flock settings
//!
//! Loaded from a JSON file by the host. Every field has a default so partial
//! files are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Direction rule for the repel (separation) term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RepelRule {
    /// `normalize(repel_sum + position)`, reproduces the classic flock
    #[default]
    Source,
    /// `normalize(position - repel_centroid)`, steers away from close neighbors
    Away,
}

impl RepelRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepelRule::Source => "Source",
            RepelRule::Away => "Away",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "source" => Some(RepelRule::Source),
            "away" => Some(RepelRule::Away),
            _ => None,
        }
    }
}

/// How an agent's orientation follows its velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrientationRule {
    /// Rotate by `acos(dot(cp, vn))` about `cp = -(vn x up)`
    #[default]
    Banked,
    /// Shortest rotation taking the model forward axis onto the velocity
    Heading,
}

impl OrientationRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrientationRule::Banked => "Banked",
            OrientationRule::Heading => "Heading",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "banked" | "bank" => Some(OrientationRule::Banked),
            "heading" => Some(OrientationRule::Heading),
            _ => None,
        }
    }
}

/// Per-agent tuning. Every agent in a flock gets a copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoidParams {
    // === Neighbor ranges ===
    pub attract_radius: f32,
    pub repel_radius: f32,
    pub align_radius: f32,

    // === Force factors ===
    pub attract_factor: f32,
    pub repel_factor: f32,
    pub align_factor: f32,

    // === Kinematic limits ===
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_altitude: f32,
    pub max_altitude: f32,
    /// Mass used to turn force into acceleration
    pub mass: f32,

    // === Rules ===
    pub repel_rule: RepelRule,
    pub orientation_rule: OrientationRule,
    /// Velocity matching within `align_radius` (off in the classic flock)
    pub alignment_enabled: bool,
}

impl Default for BoidParams {
    fn default() -> Self {
        Self {
            attract_radius: ATTRACT_RADIUS,
            repel_radius: REPEL_RADIUS,
            align_radius: ALIGN_RADIUS,

            attract_factor: ATTRACT_FACTOR,
            repel_factor: REPEL_FACTOR,
            align_factor: ALIGN_FACTOR,

            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            min_altitude: MIN_ALTITUDE,
            max_altitude: MAX_ALTITUDE,
            mass: BOID_MASS,

            repel_rule: RepelRule::Source,
            orientation_rule: OrientationRule::Banked,
            alignment_enabled: false,
        }
    }
}

impl BoidParams {
    /// Repair inverted bounds and non-positive values
    pub fn sanitized(mut self) -> Self {
        if self.min_speed < 0.0 {
            log::warn!("min_speed {} is negative, using 0", self.min_speed);
            self.min_speed = 0.0;
        }
        if self.max_speed < self.min_speed {
            log::warn!(
                "max_speed {} below min_speed {}, swapping",
                self.max_speed,
                self.min_speed
            );
            std::mem::swap(&mut self.min_speed, &mut self.max_speed);
        }
        if self.max_altitude < self.min_altitude {
            log::warn!(
                "max_altitude {} below min_altitude {}, swapping",
                self.max_altitude,
                self.min_altitude
            );
            std::mem::swap(&mut self.min_altitude, &mut self.max_altitude);
        }
        if !(self.mass > 0.0) {
            log::warn!("mass {} is not positive, using {}", self.mass, BOID_MASS);
            self.mass = BOID_MASS;
        }
        for (name, radius) in [
            ("attract_radius", &mut self.attract_radius),
            ("repel_radius", &mut self.repel_radius),
            ("align_radius", &mut self.align_radius),
        ] {
            if *radius < 0.0 {
                log::warn!("{} {} is negative, using 0", name, radius);
                *radius = 0.0;
            }
        }
        self
    }
}

/// Flock-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of agents, fixed for the life of the flock
    pub count: usize,
    /// Spawn RNG seed
    pub seed: u64,

    // === Spawn area ===
    pub spawn_half_extent: f32,
    pub spawn_altitude: f32,
    pub min_scale: f32,
    pub scale_spread: f32,

    /// Tuning shared by every agent
    pub boid: BoidParams,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            count: NUM_BOIDS,
            seed: 0,

            spawn_half_extent: SPAWN_HALF_EXTENT,
            spawn_altitude: SPAWN_ALTITUDE,
            min_scale: MIN_SCALE,
            scale_spread: SCALE_SPREAD,

            boid: BoidParams::default(),
        }
    }
}

impl Settings {
    /// Default settings with the given spawn seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings.sanitized()
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Repair values the simulation cannot run with
    pub fn sanitized(mut self) -> Self {
        if self.spawn_half_extent < 0.0 {
            log::warn!("spawn_half_extent {} is negative, using its magnitude", self.spawn_half_extent);
            self.spawn_half_extent = -self.spawn_half_extent;
        }
        if self.scale_spread < 0.0 {
            log::warn!("scale_spread {} is negative, using 0", self.scale_spread);
            self.scale_spread = 0.0;
        }
        self.boid = self.boid.sanitized();
        self
    }
}
