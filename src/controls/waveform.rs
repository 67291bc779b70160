use std::f64::consts::TAU;

const PERIOD_SECONDS: f64 = 1.5;
const STAGGER_SECONDS: f64 = 0.05;
const LOW: f64 = 0.25;
const IDLE: f64 = 0.5;

/// Bar visualizer of the full player. Heights are fractions of the full bar.
#[derive(Debug, Clone)]
pub struct Waveform {
    bars: usize,
}

impl Waveform {
    pub fn new(bars: usize) -> Self {
        Self { bars }
    }

    pub fn bar_count(&self) -> usize {
        self.bars
    }

    /// Heights at `elapsed` seconds. Each bar swings between a quarter and
    /// full height, offset from its left neighbor; idle bars rest at half.
    pub fn heights(&self, playing: bool, elapsed: f64) -> Vec<f64> {
        (0..self.bars)
            .map(|i| {
                if !playing {
                    return IDLE;
                }
                let t = elapsed - i as f64 * STAGGER_SECONDS;
                let phase = (t / PERIOD_SECONDS).rem_euclid(1.0);
                LOW + (1.0 - LOW) * (1.0 - (TAU * phase).cos()) / 2.0
            })
            .collect()
    }
}
