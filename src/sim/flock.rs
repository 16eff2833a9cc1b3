//! Flock state and the two-phase tick
//!
//! A tick is split by a barrier:
//! 1. Compute: every agent reads one snapshot taken before anything moves
//! 2. Integrate: every agent applies its own force
//!
//! Interleaving the phases would let later agents see already-moved earlier
//! agents and change the result.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::agent::{Agent, NeighborCounts, Snapshot};
use crate::host::{FlockHost, Transform};
use crate::settings::Settings;

/// A fixed-size flock (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flock {
    /// Seed the agents were spawned from
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Agents in stable index order; never grows or shrinks
    agents: Vec<Agent>,
}

impl Flock {
    /// Spawn `settings.count` agents and announce each one to the host
    pub fn new(settings: &Settings, host: &mut impl FlockHost) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let agents: Vec<Agent> = (0..settings.count)
            .map(|_| Agent::spawn(settings, &mut rng))
            .collect();

        for (index, agent) in agents.iter().enumerate() {
            host.spawn_agent(index, &agent.transform());
        }

        log::info!("Spawned {} boids (seed {})", agents.len(), settings.seed);

        Self {
            seed: settings.seed,
            time_ticks: 0,
            agents,
        }
    }

    /// Build a flock from explicit agents (scripted scenes, tests)
    pub fn from_agents(agents: Vec<Agent>) -> Self {
        Self {
            seed: 0,
            time_ticks: 0,
            agents,
        }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, index: usize) -> Option<&Agent> {
        self.agents.get(index)
    }

    /// Mutable access for hosts that teleport or nudge agents between ticks
    pub fn agent_mut(&mut self, index: usize) -> Option<&mut Agent> {
        self.agents.get_mut(index)
    }

    /// Positions and velocities of every agent, in index order
    pub fn snapshot(&self) -> Vec<Snapshot> {
        self.agents.iter().map(Agent::snapshot).collect()
    }

    /// Transforms for rendering, in index order
    pub fn transforms(&self) -> impl Iterator<Item = Transform> + '_ {
        self.agents.iter().map(Agent::transform)
    }

    /// Compute phase: every agent's force from one shared snapshot
    pub fn compute_forces(&mut self) -> Vec<NeighborCounts> {
        let snapshot = self.snapshot();
        self.agents
            .iter_mut()
            .enumerate()
            .map(|(i, agent)| agent.compute_force(i, &snapshot))
            .collect()
    }

    /// Integrate phase: apply every agent's force for `dt` seconds
    pub fn integrate_all(&mut self, dt: f32) {
        for agent in &mut self.agents {
            agent.integrate(dt);
        }
    }

    /// Advance the flock by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        let counts = self.compute_forces();
        self.integrate_all(dt);
        self.time_ticks += 1;

        if log::log_enabled!(log::Level::Trace) {
            let isolated = counts.iter().filter(|c| c.attract == 0).count();
            let crowded = counts.iter().filter(|c| c.repel > 0).count();
            log::trace!(
                "Tick {}: {} isolated, {} crowded",
                self.time_ticks,
                isolated,
                crowded
            );
        }
    }

    /// Advance and push every new transform to the host
    pub fn tick_with_host(&mut self, dt: f32, host: &mut impl FlockHost) {
        self.tick(dt);
        for (index, agent) in self.agents.iter().enumerate() {
            host.sync_agent(index, &agent.transform());
        }
    }
}
