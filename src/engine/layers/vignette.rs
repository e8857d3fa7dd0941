use crate::types::{ResolvedScene, Rgb};

use super::{Moment, Resolve, push_wash};

/// Radial darkening toward the edges of the viewport.
#[derive(Debug, Clone, Default)]
pub struct Vignette;

/// Alpha at normalised distance `r` (0 centre, 1 corner).
pub fn falloff(r: f32) -> f32 {
    if r <= 0.6 {
        0.4 * (r / 0.6)
    } else {
        0.4 + 0.5 * ((r - 0.6) / 0.4).min(1.0)
    }
}

impl Resolve for Vignette {
    fn resolve(&self, moment: &Moment, out: &mut ResolvedScene) {
        let w = moment.contract.width_px();
        let h = moment.contract.height_px();
        for (x, y) in moment.cells() {
            let (px, py) = moment.cell_center_px(x, y);
            let nx = px / w * 2.0 - 1.0;
            let ny = py / h * 2.0 - 1.0;
            let r = (nx * nx + ny * ny).sqrt() / std::f32::consts::SQRT_2;
            push_wash(out, x, y, Rgb::BLACK, falloff(r), 90);
        }
    }
}
