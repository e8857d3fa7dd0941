//! Layer types and their resolve implementations.
//!
//! Each layer lives in its own module with its struct definition and
//! `Resolve` implementation side by side. Layers paint washes (translucent
//! background colour) and glyphs; the renderer does the blending.

mod backdrop;
mod fog;
mod noise;
mod progress;
mod scar;
mod silhouette;
mod subtitle;
mod title;
mod vignette;

pub use backdrop::Backdrop;
pub use fog::FogLayer;
pub use progress::Progress;
pub use scar::{Anchor, ScarFlash};
pub use silhouette::SilhouetteLayer;
pub use subtitle::Subtitles;
pub use title::{StartControl, TitleCard};
pub use vignette::Vignette;

use crate::types::{DrawOp, ResolvedScene, Rgb, Style, TerminalContract, Wash};

/// Where in time a frame is being resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moment {
    pub contract: TerminalContract,
    /// Milliseconds since the current scene was entered.
    pub elapsed_ms: f32,
    /// Milliseconds since playback started; drives ambient drift.
    pub clock_ms: f32,
}

impl Moment {
    /// Centre of cell (x, y) in viewport pixels.
    pub fn cell_center_px(&self, x: u16, y: u16) -> (f32, f32) {
        (
            (x as f32 + 0.5) * TerminalContract::CELL_WIDTH_PX,
            (y as f32 + 0.5) * TerminalContract::CELL_HEIGHT_PX,
        )
    }

    pub fn cells(&self) -> impl Iterator<Item = (u16, u16)> + use<> {
        let TerminalContract { width, height } = self.contract;
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }
}

/// Resolve a layer for a given moment into washes and glyphs.
pub trait Resolve {
    fn resolve(&self, moment: &Moment, out: &mut ResolvedScene);
}

#[derive(Debug, Clone)]
pub enum Layer {
    Backdrop(Backdrop),
    Fog(FogLayer),
    Scar(ScarFlash),
    Silhouette(SilhouetteLayer),
    Subtitles(Subtitles),
    Progress(Progress),
    Vignette(Vignette),
    Title(TitleCard),
}

impl Resolve for Layer {
    fn resolve(&self, moment: &Moment, out: &mut ResolvedScene) {
        match self {
            Layer::Backdrop(l) => l.resolve(moment, out),
            Layer::Fog(l) => l.resolve(moment, out),
            Layer::Scar(l) => l.resolve(moment, out),
            Layer::Silhouette(l) => l.resolve(moment, out),
            Layer::Subtitles(l) => l.resolve(moment, out),
            Layer::Progress(l) => l.resolve(moment, out),
            Layer::Vignette(l) => l.resolve(moment, out),
            Layer::Title(l) => l.resolve(moment, out),
        }
    }
}

/// Washes this faint are not worth emitting.
const MIN_ALPHA: f32 = 0.004;

fn push_wash(out: &mut ResolvedScene, x: u16, y: u16, color: Rgb, alpha: f32, z_order: i32) {
    if alpha < MIN_ALPHA {
        return;
    }
    out.washes.push(Wash {
        x,
        y,
        color,
        alpha: alpha.min(1.0),
        z_order,
    });
}

fn push_text(
    out: &mut ResolvedScene,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
    opacity: f32,
    z_order: i32,
) {
    for (i, ch) in text.chars().enumerate() {
        out.ops.push(DrawOp {
            x: x + i as u16,
            y,
            ch,
            style,
            opacity,
            z_order,
        });
    }
}

/// Tailwind colours used across the layers.
pub mod palette {
    use crate::types::Rgb;

    pub const GRAY_900: Rgb = Rgb::new(17, 24, 39);
    pub const SLATE_900: Rgb = Rgb::new(15, 23, 42);
    pub const SLATE_400: Rgb = Rgb::new(148, 163, 184);
    pub const GRAY_800: Rgb = Rgb::new(31, 41, 55);
    pub const GRAY_700: Rgb = Rgb::new(55, 65, 81);
    pub const GRAY_200: Rgb = Rgb::new(229, 231, 235);
    pub const PURPLE_200: Rgb = Rgb::new(233, 213, 255);
    pub const PURPLE_400: Rgb = Rgb::new(192, 132, 252);
    pub const PURPLE_500: Rgb = Rgb::new(168, 85, 247);
    pub const PURPLE_600: Rgb = Rgb::new(147, 51, 234);
    pub const PURPLE_700: Rgb = Rgb::new(126, 34, 206);
    pub const PURPLE_800: Rgb = Rgb::new(107, 33, 168);
    pub const PURPLE_900: Rgb = Rgb::new(88, 28, 135);
}
