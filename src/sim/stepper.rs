//! Fixed timestep driver
//!
//! Hosts render at whatever rate they get. The stepper banks frame time and
//! runs whole `SIM_DT` ticks so the flock always advances in identical steps.

use super::flock::Flock;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::host::{FlockHost, NullHost};

/// Accumulates frame time into fixed ticks
#[derive(Debug, Clone, Default)]
pub struct Stepper {
    accumulator: f32,
}

impl Stepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank `frame_dt` seconds and run the ticks it pays for
    ///
    /// Returns the number of ticks run.
    pub fn advance(&mut self, flock: &mut Flock, frame_dt: f32) -> u32 {
        self.advance_with_host(flock, frame_dt, &mut NullHost)
    }

    /// Like `advance`, syncing the host after every tick
    pub fn advance_with_host(
        &mut self,
        flock: &mut Flock,
        frame_dt: f32,
        host: &mut impl FlockHost,
    ) -> u32 {
        // Also rejects NaN
        if !(frame_dt > 0.0) {
            return 0;
        }
        self.accumulator += frame_dt.min(MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            flock.tick_with_host(SIM_DT, host);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Fraction of a tick banked but not yet simulated (for interpolation)
    pub fn alpha(&self) -> f32 {
        (self.accumulator / SIM_DT).clamp(0.0, 1.0)
    }
}
