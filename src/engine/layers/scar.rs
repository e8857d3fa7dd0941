use crate::engine::state::ScarRegion;
use crate::types::ResolvedScene;

use super::palette::PURPLE_600;
use super::{Moment, Resolve, push_wash};

/// Alpha at the centre of a region at opacity 1.
const PEAK_ALPHA: f32 = 0.6;
/// Fraction of the radius where the glow has faded out.
const FADE_AT: f32 = 0.7;

/// Placement of a scar region in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// 300px square, 20% from the top, 30% from the left.
    Upper,
    /// 400px square, 30% from the bottom, 25% from the right.
    Lower,
}

impl Anchor {
    /// (centre x, centre y, radius) in viewport pixels.
    pub fn geometry(self, width_px: f32, height_px: f32) -> (f32, f32, f32) {
        match self {
            Anchor::Upper => {
                let size = 300.0;
                (width_px * 0.30 + size / 2.0, height_px * 0.20 + size / 2.0, size / 2.0)
            }
            Anchor::Lower => {
                let size = 400.0;
                (
                    width_px * 0.75 - size / 2.0,
                    height_px * 0.70 - size / 2.0,
                    size / 2.0,
                )
            }
        }
    }
}

/// A purple radial glow whose opacity follows the scene's scar intensity.
#[derive(Debug, Clone)]
pub struct ScarFlash {
    pub anchor: Anchor,
    pub region: ScarRegion,
}

impl Resolve for ScarFlash {
    fn resolve(&self, moment: &Moment, out: &mut ResolvedScene) {
        let (opacity, scale) = self.region.sample(moment.elapsed_ms);
        if opacity <= 0.0 || scale <= 0.0 {
            return;
        }
        let (cx, cy, radius) = self
            .anchor
            .geometry(moment.contract.width_px(), moment.contract.height_px());
        let radius = radius * scale;

        for (x, y) in moment.cells() {
            let (px, py) = moment.cell_center_px(x, y);
            let r = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt() / radius;
            if r >= FADE_AT {
                continue;
            }
            let falloff = 1.0 - r / FADE_AT;
            push_wash(out, x, y, PURPLE_600, opacity * PEAK_ALPHA * falloff * falloff, 20);
        }
    }
}
