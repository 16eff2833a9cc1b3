//! Deterministic simulation module
//!
//! All flocking logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, and only at spawn
//! - Stable iteration order (by agent index)
//! - Forces computed from a frozen snapshot before anything moves
//! - No rendering or platform dependencies

pub mod agent;
pub mod flock;
pub mod kinematics;
pub mod stats;
pub mod stepper;

pub use agent::{Agent, NeighborCounts, Snapshot};
pub use flock::Flock;
pub use kinematics::{banked_orientation, clamp_altitude, clamp_speed, heading_orientation};
pub use stats::FlockStats;
pub use stepper::Stepper;
