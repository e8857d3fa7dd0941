use crate::types::ResolvedScene;

use super::palette::SLATE_400;
use super::{Moment, Resolve, noise, push_wash};

/// One full horizontal drift of a fog layer.
pub const DRIFT_CYCLE_MS: f32 = 60_000.0;
/// Where in the drift cycle each parallax layer starts.
pub const LAYER_PHASES_MS: [f32; 3] = [0.0, 15_000.0, 30_000.0];

/// Peak alpha of a fully dense fog patch at opacity 1.
const DENSITY_ALPHA: f32 = 0.35;
/// Noise lattice spacing in viewport pixels.
const GRAIN_X_PX: f32 = 96.0;
const GRAIN_Y_PX: f32 = 48.0;

#[derive(Debug, Clone)]
pub struct FogLayer {
    pub index: usize,
    pub opacity: f32,
}

impl FogLayer {
    /// Horizontal drift in viewport pixels at `clock_ms`.
    pub fn drift_px(&self, clock_ms: f32, width_px: f32) -> f32 {
        let phase = LAYER_PHASES_MS[self.index % LAYER_PHASES_MS.len()];
        ((clock_ms + phase) % DRIFT_CYCLE_MS) / DRIFT_CYCLE_MS * width_px
    }
}

impl Resolve for FogLayer {
    fn resolve(&self, moment: &Moment, out: &mut ResolvedScene) {
        if self.opacity <= 0.0 {
            return;
        }
        let drift = self.drift_px(moment.clock_ms, moment.contract.width_px());
        let seed = 0x0f06 + self.index as u32;
        let z = 10 + self.index as i32;

        for (x, y) in moment.cells() {
            let (px, py) = moment.cell_center_px(x, y);
            let density = noise::fbm((px + drift) / GRAIN_X_PX, py / GRAIN_Y_PX, seed);
            push_wash(out, x, y, SLATE_400, self.opacity * density * DENSITY_ALPHA, z);
        }
    }
}
