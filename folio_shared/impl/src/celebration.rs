use std::sync::{Arc, OnceLock};

use folio_models::celebration::{ConfettiBurst, ConfettiOptions, ConfettiParticle};
use folio_shared_contracts::celebration::CelebrationService;
use rand::{seq::SliceRandom, Rng};
use tracing::debug;

const PALETTE: [&str; 7] = [
    "#26ccff", "#a25afd", "#ff5e7e", "#88ff5a", "#fcff42", "#ffa62d", "#ff36ff",
];
const MIN_VELOCITY: f64 = 25.0;
const MAX_VELOCITY: f64 = 45.0;

#[derive(Debug, Clone)]
pub struct CelebrationServiceImpl {
    config: CelebrationServiceConfig,
    engine: Arc<OnceLock<ConfettiEngine>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelebrationServiceConfig {
    pub enable: bool,
    pub confetti: ConfettiOptions,
}

impl CelebrationServiceImpl {
    pub fn new(config: CelebrationServiceConfig) -> Self {
        Self {
            config,
            engine: Default::default(),
        }
    }

    /// The engine is loaded on the first celebration and reused afterwards.
    fn engine(&self) -> &ConfettiEngine {
        self.engine.get_or_init(ConfettiEngine::load)
    }
}

impl CelebrationService for CelebrationServiceImpl {
    fn celebrate(&self) -> Option<ConfettiBurst> {
        if !self.config.enable {
            return None;
        }

        Some(self.engine().launch(&self.config.confetti))
    }
}

#[derive(Debug)]
struct ConfettiEngine {
    palette: Vec<&'static str>,
}

impl ConfettiEngine {
    fn load() -> Self {
        debug!("loading confetti engine");
        Self {
            palette: PALETTE.to_vec(),
        }
    }

    fn launch(&self, options: &ConfettiOptions) -> ConfettiBurst {
        let mut rng = rand::thread_rng();
        let half_spread = options.spread.max(0.0) / 2.0;

        let particles = (0..options.particle_count)
            .map(|_| ConfettiParticle {
                angle: 90.0 + rng.gen_range(-half_spread..=half_spread),
                velocity: rng.gen_range(MIN_VELOCITY..=MAX_VELOCITY),
                color: self.palette.choose(&mut rng).copied().unwrap_or(PALETTE[0]),
            })
            .collect();

        ConfettiBurst {
            origin_y: options.origin_y,
            particles,
        }
    }
}
