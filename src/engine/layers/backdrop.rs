use crate::types::{ResolvedScene, Rgb};

use super::palette::{GRAY_900, SLATE_900};
use super::{Moment, Resolve, push_wash};

/// Opaque vertical gradient: gray-900 → slate-900 → black.
#[derive(Debug, Clone, Default)]
pub struct Backdrop;

fn gradient(t: f32) -> Rgb {
    if t < 0.5 {
        GRAY_900.blend(SLATE_900, t * 2.0)
    } else {
        SLATE_900.blend(Rgb::BLACK, (t - 0.5) * 2.0)
    }
}

impl Resolve for Backdrop {
    fn resolve(&self, moment: &Moment, out: &mut ResolvedScene) {
        let rows = moment.contract.height.saturating_sub(1).max(1) as f32;
        for (x, y) in moment.cells() {
            push_wash(out, x, y, gradient(y as f32 / rows), 1.0, 0);
        }
    }
}
