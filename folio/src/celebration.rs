use std::fmt::Write;

use folio_models::celebration::ConfettiBurst;
use folio_shared_contracts::celebration::CelebrationService;

const WIDTH: usize = 48;

/// Prints every burst of the wrapped service as a row of colored confetti.
#[derive(Debug, Clone)]
pub struct TerminalCelebration<Celebration> {
    inner: Celebration,
}

impl<Celebration> TerminalCelebration<Celebration> {
    pub fn new(inner: Celebration) -> Self {
        Self { inner }
    }
}

impl<Celebration: CelebrationService> CelebrationService for TerminalCelebration<Celebration> {
    fn celebrate(&self) -> Option<ConfettiBurst> {
        let burst = self.inner.celebrate()?;
        println!("{}", render(&burst));
        Some(burst)
    }
}

/// Places each particle in the column its launch angle points to, leftmost
/// for 180 degrees and rightmost for 0 degrees.
pub fn render(burst: &ConfettiBurst) -> String {
    let mut row = vec![None; WIDTH];
    for particle in &burst.particles {
        let position = (180.0 - particle.angle.clamp(0.0, 180.0)) / 180.0;
        let column = (position * (WIDTH - 1) as f64).round() as usize;
        row[column.min(WIDTH - 1)] = Some(particle.color);
    }

    row.into_iter().fold(String::new(), |mut out, cell| {
        match cell.and_then(rgb) {
            Some((r, g, b)) => {
                let _ = write!(out, "\x1b[38;2;{r};{g};{b}m*\x1b[0m");
            }
            None => out.push(' '),
        }
        out
    })
}

fn rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#').filter(|hex| hex.len() == 6)?;
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
