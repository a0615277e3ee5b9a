use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ConfettiOptions {
    pub particle_count: usize,
    /// Opening angle of the burst in degrees.
    pub spread: f64,
    /// Vertical origin as a fraction of the viewport height.
    pub origin_y: f64,
}

impl Default for ConfettiOptions {
    fn default() -> Self {
        Self {
            particle_count: 150,
            spread: 180.0,
            origin_y: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiBurst {
    pub origin_y: f64,
    pub particles: Vec<ConfettiParticle>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfettiParticle {
    /// Launch angle in degrees, `90` pointing straight up.
    pub angle: f64,
    pub velocity: f64,
    pub color: &'static str,
}
