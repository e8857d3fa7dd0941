use crate::engine::state::Silhouette;
use crate::types::{ResolvedScene, Rgb};

use super::palette::{GRAY_700, GRAY_800};
use super::{Moment, Resolve, push_wash};

/// Height of the figure's bounding box in viewport pixels before fitting.
const FIGURE_HEIGHT_PX: f32 = 600.0;
/// Softness every part of the figure has even without fog.
const BASE_SOFTNESS_PX: f32 = 4.0;

/// A part of the figure, in figure space: origin at bottom centre, y up.
#[derive(Debug, Clone, Copy)]
enum Shape {
    /// Box with a fully rounded top.
    Body { half_w: f32, height: f32 },
    Ellipse { cy: f32, rx: f32, ry: f32 },
    Slab { bottom: f32, half_w: f32, height: f32 },
}

impl Shape {
    /// Approximate signed distance in pixels; negative inside.
    fn distance(self, x: f32, y: f32) -> f32 {
        match self {
            Shape::Body { half_w, height } => {
                let shoulder = height - half_w;
                let rect = box_distance(x, y - shoulder / 2.0, half_w, shoulder / 2.0);
                let cap = ellipse_distance(x, y - shoulder, half_w, half_w);
                rect.min(cap)
            }
            Shape::Ellipse { cy, rx, ry } => ellipse_distance(x, y - cy, rx, ry),
            Shape::Slab {
                bottom,
                half_w,
                height,
            } => box_distance(x, y - bottom - height / 2.0, half_w, height / 2.0),
        }
    }
}

fn box_distance(x: f32, y: f32, half_w: f32, half_h: f32) -> f32 {
    let dx = x.abs() - half_w;
    let dy = y.abs() - half_h;
    let outside = (dx.max(0.0).powi(2) + dy.max(0.0).powi(2)).sqrt();
    outside + dx.max(dy).min(0.0)
}

fn ellipse_distance(x: f32, y: f32, rx: f32, ry: f32) -> f32 {
    let k = ((x / rx).powi(2) + (y / ry).powi(2)).sqrt();
    (k - 1.0) * rx.min(ry)
}

/// (shape, colour at its base, colour at its top, alpha at base, alpha at top)
const PARTS: [(Shape, Rgb, Rgb, f32, f32); 3] = [
    (
        Shape::Body {
            half_w: 96.0,
            height: 384.0,
        },
        GRAY_800,
        GRAY_700,
        0.6,
        0.3,
    ),
    (
        Shape::Ellipse {
            cy: 464.0,
            rx: 64.0,
            ry: 80.0,
        },
        GRAY_800,
        GRAY_700,
        0.5,
        0.5,
    ),
    (
        Shape::Slab {
            bottom: 320.0,
            half_w: 112.0,
            height: 128.0,
        },
        GRAY_800,
        GRAY_800,
        0.4,
        0.4,
    ),
];

/// The standing figure, bottom-centred, blurred by the fog.
#[derive(Debug, Clone)]
pub struct SilhouetteLayer {
    pub silhouette: Silhouette,
}

impl Resolve for SilhouetteLayer {
    fn resolve(&self, moment: &Moment, out: &mut ResolvedScene) {
        let (opacity, blur_px) = self.silhouette.sample(moment.elapsed_ms);
        if opacity <= 0.0 {
            return;
        }
        let width_px = moment.contract.width_px();
        let height_px = moment.contract.height_px();
        let fit = (height_px * 0.85 / FIGURE_HEIGHT_PX).min(1.0);
        let softness = blur_px + BASE_SOFTNESS_PX;

        for (x, y) in moment.cells() {
            let (px, py) = moment.cell_center_px(x, y);
            let fx = (px - width_px / 2.0) / fit;
            let fy = (height_px - py) / fit;

            for (shape, base, top, base_alpha, top_alpha) in PARTS {
                let coverage = (0.5 - shape.distance(fx, fy) / (2.0 * softness)).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let t = (fy / FIGURE_HEIGHT_PX).clamp(0.0, 1.0);
                let alpha = base_alpha + (top_alpha - base_alpha) * t;
                push_wash(
                    out,
                    x,
                    y,
                    base.blend(top, t),
                    alpha * coverage * opacity,
                    30,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TerminalContract;

    fn moment(elapsed_ms: f32) -> Moment {
        Moment {
            contract: TerminalContract { width: 80, height: 30 },
            elapsed_ms,
            clock_ms: 0.0,
        }
    }

    fn layer(dissolve: bool) -> SilhouetteLayer {
        SilhouetteLayer {
            silhouette: Silhouette {
                blur_px: 6.4,
                dissolve,
            },
        }
    }

    #[test]
    fn shapes_contain_their_centres() {
        for (shape, ..) in PARTS {
            let inside = match shape {
                Shape::Body { height, .. } => (0.0, height / 2.0),
                Shape::Ellipse { cy, .. } => (0.0, cy),
                Shape::Slab { bottom, height, .. } => (0.0, bottom + height / 2.0),
            };
            assert!(shape.distance(inside.0, inside.1) < 0.0);
            assert!(shape.distance(1_000.0, 1_000.0) > 0.0);
        }
    }

    #[test]
    fn figure_is_bottom_centred() {
        let mut out = ResolvedScene::default();
        layer(false).resolve(&moment(0.0), &mut out);
        assert!(out.washes.iter().any(|w| w.x == 40 && w.y == 29));
        assert!(!out.washes.iter().any(|w| w.x == 0 && w.y == 0));
    }

    #[test]
    fn dissolved_figure_vanishes() {
        let mut out = ResolvedScene::default();
        layer(true).resolve(&moment(3_000.0), &mut out);
        assert!(out.washes.is_empty());
    }
}
