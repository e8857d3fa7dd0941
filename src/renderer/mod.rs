//! Renderer: the deterministic rasterizer.
//!
//! Takes `ResolvedScene`s (in-memory, from the engine) and produces `Frame`s
//! for the player. The first frame after construction or `invalidate` is a
//! full frame; later frames are diffs against the previous grid.
//!
//! The renderer knows nothing about time, animation, or scenes. Given the
//! same input, rasterization always produces the same grid.

use crate::types::{Cell, CellChange, Frame, ResolvedScene, Rgb, Style, TerminalContract, Wash};

pub struct Renderer {
    contract: TerminalContract,
    previous: Option<Vec<Vec<Cell>>>,
}

impl Renderer {
    pub fn new(contract: TerminalContract) -> Self {
        Renderer {
            contract,
            previous: None,
        }
    }

    pub fn contract(&self) -> TerminalContract {
        self.contract
    }

    /// Forget the previous grid so the next frame is full, optionally at a
    /// new size.
    pub fn invalidate(&mut self, contract: TerminalContract) {
        self.contract = contract;
        self.previous = None;
    }

    /// Render one resolved scene into a frame.
    pub fn render(&mut self, scene: &ResolvedScene) -> Frame {
        let grid = Self::rasterize(scene, &self.contract);
        let frame = match &self.previous {
            None => Frame::Full {
                cells: grid.clone(),
            },
            Some(prev) => Frame::Diff {
                changes: Self::diff(prev, &grid),
            },
        };
        self.previous = Some(grid);
        frame
    }

    /// Rasterize a resolved scene onto a fixed-size cell grid.
    ///
    /// Washes are blended into each cell's background in z-order. Glyphs are
    /// then placed in z-order so higher z values paint over lower ones. A
    /// glyph's opacity fades its foreground toward the washes beneath it, and
    /// washes above it (the vignette) tint the foreground as well.
    pub fn rasterize(scene: &ResolvedScene, contract: &TerminalContract) -> Vec<Vec<Cell>> {
        let w = contract.width as usize;
        let h = contract.height as usize;

        let mut washes: Vec<&Wash> = scene.washes.iter().collect();
        washes.sort_by_key(|wash| wash.z_order);
        let mut stacks: Vec<Vec<Vec<&Wash>>> = vec![vec![Vec::new(); w]; h];
        for wash in washes {
            let x = wash.x as usize;
            let y = wash.y as usize;
            if x < w && y < h {
                stacks[y][x].push(wash);
            }
        }
        let backgrounds: Vec<Vec<Rgb>> = stacks
            .iter()
            .map(|row| row.iter().map(|stack| composite(Rgb::BLACK, stack)).collect())
            .collect();

        let mut grid: Vec<Vec<Cell>> = backgrounds
            .iter()
            .map(|row| {
                row.iter()
                    .map(|bg| Cell {
                        ch: ' ',
                        style: Style {
                            bg: Some(*bg),
                            ..Style::default()
                        },
                    })
                    .collect()
            })
            .collect();

        let mut ops: Vec<_> = scene.ops.iter().collect();
        ops.sort_by_key(|op| op.z_order);
        for op in ops {
            let x = op.x as usize;
            let y = op.y as usize;
            if x >= w || y >= h {
                continue;
            }
            let bg = backgrounds[y][x];
            let stack = &stacks[y][x];
            let split = stack.partition_point(|wash| wash.z_order <= op.z_order);
            let under = composite(Rgb::BLACK, &stack[..split]);
            let fg = op
                .style
                .fg
                .map(|fg| composite(under.blend(fg, op.opacity), &stack[split..]));
            grid[y][x] = Cell {
                ch: op.ch,
                style: Style {
                    fg,
                    bg: Some(bg),
                    ..op.style
                },
            };
        }

        grid
    }

    /// Compute a cell-level diff between two grids.
    fn diff(prev: &[Vec<Cell>], next: &[Vec<Cell>]) -> Vec<CellChange> {
        let mut changes = Vec::new();
        for (y, (prev_row, next_row)) in prev.iter().zip(next.iter()).enumerate() {
            for (x, (prev_cell, next_cell)) in prev_row.iter().zip(next_row.iter()).enumerate() {
                if prev_cell != next_cell {
                    changes.push(CellChange {
                        x: x as u16,
                        y: y as u16,
                        cell: next_cell.clone(),
                    });
                }
            }
        }
        changes
    }
}

/// Blend `washes` over `base` in order.
fn composite(base: Rgb, washes: &[&Wash]) -> Rgb {
    washes
        .iter()
        .fold(base, |under, wash| under.blend(wash.color, wash.alpha))
}

/// Text content of a grid row, for inspection.
pub fn row_text(grid: &[Vec<Cell>], y: usize) -> String {
    grid.get(y)
        .map(|row| row.iter().map(|c| c.ch).collect())
        .unwrap_or_default()
}
