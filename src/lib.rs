//! Boid Flock - a deterministic 3D flocking core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (agents, flock, fixed-step driver)
//! - `settings`: Data-driven flock configuration
//! - `host`: Seam to the embedding application that renders the agents

pub mod host;
pub mod settings;
pub mod sim;

pub use host::{FlockHost, NullHost, Transform};
pub use settings::{BoidParams, OrientationRule, RepelRule, Settings};
pub use sim::{Agent, Flock, FlockStats, NeighborCounts, Stepper};

use glam::Vec3;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame time the stepper will try to catch up on
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Number of boids in a flock
    pub const NUM_BOIDS: usize = 80;

    /// Neighbor ranges
    pub const ATTRACT_RADIUS: f32 = 200.0;
    pub const REPEL_RADIUS: f32 = 20.0;
    pub const ALIGN_RADIUS: f32 = 5.0;

    /// Force factors (direction scale and error gain share one constant)
    pub const ATTRACT_FACTOR: f32 = 10.0;
    pub const REPEL_FACTOR: f32 = 2.0;
    pub const ALIGN_FACTOR: f32 = 2.0;

    /// Speed bounds (units/s)
    pub const MIN_SPEED: f32 = 10.0;
    pub const MAX_SPEED: f32 = 50.0;

    /// Altitude bounds (world Y)
    pub const MIN_ALTITUDE: f32 = 10.0;
    pub const MAX_ALTITUDE: f32 = 50.0;

    /// Boid body mass (force -> acceleration)
    pub const BOID_MASS: f32 = 10.0;

    /// Spawn area: x/z in [-SPAWN_HALF_EXTENT, SPAWN_HALF_EXTENT)
    pub const SPAWN_HALF_EXTENT: f32 = 90.0;
    pub const SPAWN_ALTITUDE: f32 = 30.0;
    /// Uniform scale in [MIN_SCALE, MIN_SCALE + SCALE_SPREAD)
    pub const MIN_SCALE: f32 = 2.0;
    pub const SCALE_SPREAD: f32 = 5.0;
}

/// World up axis
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Local forward axis of a boid model
pub const FORWARD: Vec3 = Vec3::Z;

/// Normalize `v`, returning `fallback` for zero-length or non-finite input
#[inline]
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(fallback)
}
