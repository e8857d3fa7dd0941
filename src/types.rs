//! Shared boundary types for the narrative player.
//!
//! This module defines the two key data contracts:
//! - Engine → Renderer (in-memory): `ResolvedScene` containing `Wash`es and `DrawOp`s
//! - Renderer → Player (in-memory): `Frame`s of cells, full or diffed

// ---------------------------------------------------------------------------
// Shared style primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Alpha-blend `over` on top of `self`. `alpha` is clamped to [0, 1].
    pub fn blend(self, over: Rgb, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |under: u8, over: u8| -> u8 {
            (under as f32 * (1.0 - a) + over as f32 * a).round() as u8
        };
        Rgb {
            r: mix(self.r, over.r),
            g: mix(self.g, over.g),
            b: mix(self.b, over.b),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
}

impl Style {
    pub fn fg(color: Rgb) -> Self {
        Style {
            fg: Some(color),
            ..Style::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Engine → Renderer boundary
// ---------------------------------------------------------------------------

/// A glyph placed on the canvas. `opacity` fades the foreground toward the
/// background the renderer composes underneath it.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOp {
    pub x: u16,
    pub y: u16,
    pub ch: char,
    pub style: Style,
    pub opacity: f32,
    pub z_order: i32,
}

/// A translucent colour laid over a cell's background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wash {
    pub x: u16,
    pub y: u16,
    pub color: Rgb,
    pub alpha: f32,
    pub z_order: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedScene {
    pub width: u16,
    pub height: u16,
    pub washes: Vec<Wash>,
    pub ops: Vec<DrawOp>,
}

// ---------------------------------------------------------------------------
// Renderer → Player boundary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalContract {
    pub width: u16,
    pub height: u16,
}

impl TerminalContract {
    /// Nominal size of one terminal cell in CSS pixels.
    pub const CELL_WIDTH_PX: f32 = 8.0;
    pub const CELL_HEIGHT_PX: f32 = 16.0;

    pub fn width_px(&self) -> f32 {
        self.width as f32 * Self::CELL_WIDTH_PX
    }

    pub fn height_px(&self) -> f32 {
        self.height as f32 * Self::CELL_HEIGHT_PX
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            style: Style::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellChange {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}

#[derive(Debug, Clone)]
pub enum Frame {
    Full { cells: Vec<Vec<Cell>> },
    Diff { changes: Vec<CellChange> },
}
