//! Boid Flock headless driver
//!
//! Runs a flock without a renderer and reports its state.
//!
//! Usage: `boid-flock [settings.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
use boid_flock::{Flock, FlockHost, FlockStats, Settings, Stepper, Transform};

/// Host that only logs spawns
#[cfg(not(target_arch = "wasm32"))]
struct LogHost;

#[cfg(not(target_arch = "wasm32"))]
impl FlockHost for LogHost {
    fn spawn_agent(&mut self, index: usize, transform: &Transform) {
        log::debug!(
            "Boid {} at ({:.1}, {:.1}, {:.1}) scale {:.2}",
            index,
            transform.position.x,
            transform.position.y,
            transform.position.z,
            transform.scale
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Boid Flock (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let seconds: f32 = match args.next().map(|s| s.parse()) {
        Some(Ok(secs)) => secs,
        Some(Err(e)) => {
            log::warn!("Invalid duration ({}), running 10 s", e);
            10.0
        }
        None => 10.0,
    };

    let mut flock = Flock::new(&settings, &mut LogHost);
    let mut stepper = Stepper::new();

    // Pretend to render at 60 fps
    let frame_dt = 1.0 / 60.0;
    let frames = (seconds / frame_dt).round() as u32;
    for frame in 1..=frames {
        stepper.advance(&mut flock, frame_dt);
        if frame % 60 == 0 {
            let stats = FlockStats::collect(&flock);
            log::info!(
                "t={:.0}s centroid=({:.1}, {:.1}, {:.1}) speed={:.1} [{:.1}, {:.1}]",
                frame as f32 * frame_dt,
                stats.centroid.x,
                stats.centroid.y,
                stats.centroid.z,
                stats.mean_speed,
                stats.min_speed,
                stats.max_speed
            );
        }
    }

    let stats = FlockStats::collect(&flock);
    match serde_json::to_string_pretty(&stats) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize stats: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on wasm; the host embeds the flock directly
}
