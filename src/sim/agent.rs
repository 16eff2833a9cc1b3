//! A single boid
//!
//! Each agent steers with two distance rules evaluated against a frozen
//! snapshot of the whole flock:
//! - Attract: pull toward the centroid of everything within `attract_radius`
//! - Repel: push driven by everything within `repel_radius`
//!
//! The two rules are independent, so a neighbor inside the repel range also
//! counts toward attraction.

use glam::{Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::kinematics::{banked_orientation, clamp_altitude, clamp_speed, heading_orientation};
use crate::host::Transform;
use crate::settings::{BoidParams, OrientationRule, RepelRule, Settings};
use crate::{FORWARD, normalize_or};

/// Frozen position and velocity of one agent, read during the compute phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// How many neighbors fed each rule during one `compute_force`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NeighborCounts {
    pub attract: usize,
    pub repel: usize,
    /// Always 0 unless alignment is enabled
    pub align: usize,
}

/// A boid entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub position: Vec3,
    pub velocity: Vec3,
    pub orientation: Quat,
    /// Uniform visual scale, fixed at spawn
    pub scale: f32,
    /// Steering force from the last compute phase (consumed by `integrate`)
    pub force: Vec3,
    pub params: BoidParams,
}

impl Agent {
    /// An agent at rest at `position`, facing +Z
    pub fn new(position: Vec3, params: BoidParams) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: 1.0,
            force: Vec3::ZERO,
            params,
        }
    }

    /// Spawn at a random spot in the settings' spawn area with a random yaw and scale
    pub fn spawn<R: Rng>(settings: &Settings, rng: &mut R) -> Self {
        let half = settings.spawn_half_extent;
        let x = rng.random::<f32>() * 2.0 * half - half;
        let z = rng.random::<f32>() * 2.0 * half - half;
        let yaw = rng.random::<f32>() * TAU;
        let scale = settings.min_scale + rng.random::<f32>() * settings.scale_spread;

        Self {
            orientation: Quat::from_rotation_y(yaw),
            scale,
            ..Self::new(Vec3::new(x, settings.spawn_altitude, z), settings.boid)
        }
    }

    /// Builder: set the velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Position and velocity as seen by neighbors
    #[inline]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.position,
            velocity: self.velocity,
        }
    }

    /// Transform handed to the host for rendering
    #[inline]
    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.orientation,
            scale: self.scale,
        }
    }

    /// Direction the model currently faces
    #[inline]
    pub fn heading(&self) -> Vec3 {
        self.orientation * FORWARD
    }

    /// Compute this tick's steering force against `snapshot`
    ///
    /// `self_index` is this agent's slot in `snapshot`. Self is skipped by slot,
    /// never by position, so coincident agents still see each other.
    pub fn compute_force(&mut self, self_index: usize, snapshot: &[Snapshot]) -> NeighborCounts {
        let p = self.params;
        self.force = Vec3::ZERO;

        let mut counts = NeighborCounts::default();
        let mut attract_sum = Vec3::ZERO;
        let mut repel_sum = Vec3::ZERO;
        let mut align_sum = Vec3::ZERO;

        for (j, other) in snapshot.iter().enumerate() {
            if j == self_index {
                continue;
            }
            let d = (self.position - other.position).length();

            if d < p.attract_radius {
                attract_sum += other.position;
                counts.attract += 1;
            }
            if d < p.repel_radius {
                repel_sum += other.position;
                counts.repel += 1;
            }
            if p.alignment_enabled && d < p.align_radius {
                align_sum += other.velocity;
                counts.align += 1;
            }
        }

        if counts.attract > 0 {
            let com = attract_sum / counts.attract as f32;
            let dir = normalize_or(com - self.position, Vec3::ZERO);
            self.force += steer(dir, self.velocity, p.attract_factor);
        }

        if counts.repel > 0 {
            let dir = match p.repel_rule {
                RepelRule::Source => normalize_or(repel_sum + self.position, Vec3::ZERO),
                RepelRule::Away => normalize_or(
                    self.position - repel_sum / counts.repel as f32,
                    Vec3::ZERO,
                ),
            };
            self.force += steer(dir, self.velocity, p.repel_factor);
        }

        if counts.align > 0 {
            let avg = align_sum / counts.align as f32;
            let dir = normalize_or(avg, Vec3::ZERO);
            self.force += steer(dir, self.velocity, p.align_factor);
        }

        counts
    }

    /// Apply the computed force and advance one step of `dt` seconds
    ///
    /// Afterwards speed is within `[min_speed, max_speed]` and altitude within
    /// `[min_altitude, max_altitude]`.
    pub fn integrate(&mut self, dt: f32) {
        let p = self.params;

        self.velocity += self.force / p.mass * dt;
        self.velocity = clamp_speed(self.velocity, p.min_speed, p.max_speed, self.heading());

        self.orientation = match p.orientation_rule {
            OrientationRule::Banked => banked_orientation(self.velocity, self.orientation),
            OrientationRule::Heading => heading_orientation(self.velocity, self.orientation),
        };

        self.position += self.velocity * dt;
        self.position = clamp_altitude(self.position, p.min_altitude, p.max_altitude);
    }
}

/// Proportional steering: desired velocity `dir * factor`, error gain `factor`
#[inline]
fn steer(dir: Vec3, velocity: Vec3, factor: f32) -> Vec3 {
    (dir * factor - velocity) * factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn at(x: f32, y: f32, z: f32) -> Agent {
        Agent::new(Vec3::new(x, y, z), BoidParams::default())
    }

    fn snapshot_of(agents: &[Agent]) -> Vec<Snapshot> {
        agents.iter().map(Agent::snapshot).collect()
    }

    #[test]
    fn test_isolated_agent_has_zero_force() {
        let mut agents = vec![at(0.0, 20.0, 0.0), at(500.0, 20.0, 0.0)];
        let snap = snapshot_of(&agents);
        agents[0].force = Vec3::splat(99.0);

        let counts = agents[0].compute_force(0, &snap);
        assert_eq!(counts, NeighborCounts::default());
        assert_eq!(agents[0].force, Vec3::ZERO);
    }

    #[test]
    fn test_close_neighbor_counts_for_both_rules() {
        // d = 5 < repel (20) < attract (200): both rules fire
        let mut agents = vec![at(0.0, 20.0, 0.0), at(5.0, 20.0, 0.0)];
        let snap = snapshot_of(&agents);

        for i in 0..2 {
            let counts = agents[i].compute_force(i, &snap);
            assert_eq!(counts.attract, 1);
            assert_eq!(counts.repel, 1);
            assert_eq!(counts.align, 0);
        }
    }

    #[test]
    fn test_attract_and_source_repel_terms() {
        let mut agents = vec![at(0.0, 20.0, 0.0), at(5.0, 20.0, 0.0)];
        let snap = snapshot_of(&agents);
        agents[0].compute_force(0, &snap);

        // Attract: dir (1,0,0) * 10, gain 10 -> (100,0,0)
        // Repel: normalize((5,20,0) + (0,20,0)) * 2, gain 2 -> 4 * (5,40,0)/|(5,40,0)|
        let repel = Vec3::new(5.0, 40.0, 0.0).normalize() * 4.0;
        let expected = Vec3::new(100.0, 0.0, 0.0) + repel;
        assert!((agents[0].force - expected).length() < 1e-4);
        // The sum-plus-position direction lifts the agent instead of pushing it away
        assert!(agents[0].force.y > 0.0);
    }

    #[test]
    fn test_away_repel_pushes_from_neighbor() {
        let params = BoidParams {
            repel_rule: RepelRule::Away,
            ..Default::default()
        };
        let mut a = Agent::new(Vec3::new(0.0, 20.0, 0.0), params);
        let b = Agent::new(Vec3::new(5.0, 20.0, 0.0), params);
        let snap = vec![a.snapshot(), b.snapshot()];
        a.compute_force(0, &snap);

        // Attract (100,0,0) plus repel (-4,0,0)
        assert!((a.force - Vec3::new(96.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_force_opposes_current_velocity() {
        let mut agents = vec![
            at(0.0, 20.0, 0.0).with_velocity(Vec3::new(0.0, 0.0, 30.0)),
            at(100.0, 20.0, 0.0),
        ];
        let snap = snapshot_of(&agents);
        agents[0].compute_force(0, &snap);

        // (dir * 10 - v) * 10 with dir = +X, v = 30 Z
        assert!((agents[0].force - Vec3::new(100.0, 0.0, -300.0)).length() < 1e-3);
    }

    #[test]
    fn test_self_skipped_by_index_not_position() {
        let mut agents = vec![at(10.0, 20.0, 10.0), at(10.0, 20.0, 10.0)];
        let snap = snapshot_of(&agents);

        let counts = agents[0].compute_force(0, &snap);
        assert_eq!(counts.attract, 1);
        assert_eq!(counts.repel, 1);
        assert!(agents[0].force.is_finite());
    }

    #[test]
    fn test_alignment_off_by_default() {
        let mut agents = vec![
            at(0.0, 20.0, 0.0),
            at(1.0, 20.0, 0.0).with_velocity(Vec3::new(0.0, 0.0, 20.0)),
        ];
        let snap = snapshot_of(&agents);
        let counts = agents[0].compute_force(0, &snap);
        assert_eq!(counts.align, 0);
    }

    #[test]
    fn test_alignment_matches_neighbor_velocity_when_enabled() {
        let params = BoidParams {
            alignment_enabled: true,
            ..Default::default()
        };
        let base = BoidParams::default();
        let neighbor = Agent::new(Vec3::new(1.0, 20.0, 0.0), params)
            .with_velocity(Vec3::new(0.0, 0.0, 20.0));

        let mut aligned = Agent::new(Vec3::new(0.0, 20.0, 0.0), params);
        let mut plain = Agent::new(Vec3::new(0.0, 20.0, 0.0), base);
        let snap = vec![aligned.snapshot(), neighbor.snapshot()];

        let counts = aligned.compute_force(0, &snap);
        plain.compute_force(0, &snap);

        assert_eq!(counts.align, 1);
        // Extra term: +Z * 2, gain 2
        assert!((aligned.force - plain.force - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-4);
    }

    #[test]
    fn test_integrate_clamps_speed_and_altitude() {
        let mut agent = at(0.0, 5.0, 0.0).with_velocity(Vec3::new(200.0, 0.0, 0.0));
        agent.integrate(1.0 / 60.0);
        assert!((agent.velocity.length() - 50.0).abs() < 1e-3);
        assert_eq!(agent.position.y, 10.0);

        let mut agent = at(0.0, 90.0, 0.0).with_velocity(Vec3::new(1.0, 0.0, 0.0));
        agent.integrate(1.0 / 60.0);
        assert!((agent.velocity.length() - 10.0).abs() < 1e-3);
        assert_eq!(agent.position.y, 50.0);
    }

    #[test]
    fn test_integrate_applies_force_over_mass() {
        let mut agent = at(0.0, 20.0, 0.0).with_velocity(Vec3::new(20.0, 0.0, 0.0));
        agent.force = Vec3::new(100.0, 0.0, 0.0);
        agent.integrate(0.5);
        // v = 20 + 100 / 10 * 0.5 = 25
        assert!((agent.velocity - Vec3::new(25.0, 0.0, 0.0)).length() < 1e-4);
        assert!((agent.position - Vec3::new(12.5, 20.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_integrate_from_rest_flies_along_heading() {
        let mut agent = at(0.0, 20.0, 0.0);
        agent.orientation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let heading = agent.heading();
        agent.integrate(1.0 / 60.0);
        assert!((agent.velocity - heading * 10.0).length() < 1e-4);
    }

    #[test]
    fn test_spawn_within_area() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let agent = Agent::spawn(&settings, &mut rng);
            assert!(agent.position.x.abs() <= 90.0);
            assert!(agent.position.z.abs() <= 90.0);
            assert_eq!(agent.position.y, 30.0);
            assert!(agent.scale >= 2.0 && agent.scale < 7.0);
            assert_eq!(agent.velocity, Vec3::ZERO);
            // Yaw only: heading stays horizontal
            assert!(agent.heading().y.abs() < 1e-5);
        }
    }
}
