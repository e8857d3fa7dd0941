use crate::engine::state::Marker;
use crate::types::{DrawOp, ResolvedScene, Style};

use super::palette::{GRAY_700, PURPLE_500, PURPLE_800};
use super::{Moment, Resolve};

/// Row of the marker strip (32px from the top).
const ROW: u16 = 2;
/// Width of the current marker, in cells.
const CURRENT_WIDTH: u16 = 4;
const DOT: char = '•';
const BAR: char = '━';

/// One marker per scene: the current one long and bright, past ones dim,
/// future ones neutral.
#[derive(Debug, Clone)]
pub struct Progress {
    pub markers: Vec<Marker>,
}

impl Progress {
    fn strip_width(&self) -> u16 {
        let n = self.markers.len() as u16;
        let wide = self.markers.iter().filter(|m| **m == Marker::Current).count() as u16;
        n + wide * (CURRENT_WIDTH - 1) + n.saturating_sub(1)
    }
}

impl Resolve for Progress {
    fn resolve(&self, moment: &Moment, out: &mut ResolvedScene) {
        if moment.contract.height <= ROW {
            return;
        }
        let mut x = moment.contract.width.saturating_sub(self.strip_width()) / 2;
        for marker in &self.markers {
            let (ch, width, color) = match marker {
                Marker::Current => (BAR, CURRENT_WIDTH, PURPLE_500),
                Marker::Past => (DOT, 1, PURPLE_800),
                Marker::Future => (DOT, 1, GRAY_700),
            };
            for dx in 0..width {
                out.ops.push(DrawOp {
                    x: x + dx,
                    y: ROW,
                    ch,
                    style: Style::fg(color),
                    opacity: 1.0,
                    z_order: 60,
                });
            }
            x += width + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TerminalContract;

    #[test]
    fn strip_is_centred_with_wide_current_marker() {
        let progress = Progress {
            markers: vec![Marker::Past, Marker::Current, Marker::Future],
        };
        assert_eq!(progress.strip_width(), 1 + 4 + 1 + 2);

        let moment = Moment {
            contract: TerminalContract { width: 20, height: 10 },
            elapsed_ms: 0.0,
            clock_ms: 0.0,
        };
        let mut out = ResolvedScene::default();
        progress.resolve(&moment, &mut out);

        let row: String = out.ops.iter().map(|op| op.ch).collect();
        assert_eq!(row, "•━━━━•");
        assert_eq!(out.ops[0].x, 6);
        assert_eq!(out.ops[0].style.fg, Some(PURPLE_800));
        assert_eq!(out.ops[5].x, 13);
        assert_eq!(out.ops[5].style.fg, Some(GRAY_700));
    }
}
