//! Host abstraction layer
//!
//! The embedding application owns the visuals (scene nodes, meshes, materials).
//! The flock only hands it transforms:
//! - once per agent at spawn
//! - optionally once per agent per tick

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Placement of one agent for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    /// Uniform scale
    pub scale: f32,
}

/// Callbacks from the flock into the host
pub trait FlockHost {
    /// Create the visual for agent `index` at its spawn transform
    fn spawn_agent(&mut self, index: usize, transform: &Transform);

    /// Move the visual for agent `index` after integration
    fn sync_agent(&mut self, _index: usize, _transform: &Transform) {}
}

/// Host that ignores every callback (headless runs, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl FlockHost for NullHost {
    fn spawn_agent(&mut self, _index: usize, _transform: &Transform) {}
}
