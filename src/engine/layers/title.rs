use crate::menubar::{menu_bar_ops, menu_bar_width};
use crate::types::{DrawOp, ResolvedScene, Style, TerminalContract};

use super::palette::{PURPLE_200, PURPLE_600, PURPLE_700, PURPLE_900, SLATE_400};
use super::{Moment, Resolve, push_text, push_wash};

pub const START_LABEL: &str = "НАЧАТЬ";
/// Horizontal padding inside the control, in cells (48px).
const PAD_X: u16 = 6;
/// Vertical padding inside the control, in cells.
const PAD_Y: u16 = 1;

/// Screen rectangle of the start control. Clicks inside it start playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartControl {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl StartControl {
    pub fn layout(contract: TerminalContract) -> Self {
        let width = START_LABEL.chars().count() as u16 + PAD_X * 2 + 2;
        let height = 1 + PAD_Y * 2 + 2;
        StartControl {
            x: contract.width.saturating_sub(width) / 2,
            y: contract.height.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x + self.width
            && row >= self.y
            && row < self.y + self.height
    }
}

fn draw_frame(ops: &mut Vec<DrawOp>, control: &StartControl, style: Style, z: i32) {
    let StartControl {
        x: fx,
        y: fy,
        width: fw,
        height: fh,
    } = *control;
    if fw < 2 || fh < 2 {
        return;
    }
    let mut put = |x: u16, y: u16, ch: char| {
        ops.push(DrawOp { x, y, ch, style, opacity: 1.0, z_order: z });
    };

    put(fx,          fy,          '┌');
    put(fx + fw - 1, fy,          '┐');
    put(fx,          fy + fh - 1, '└');
    put(fx + fw - 1, fy + fh - 1, '┘');
    for i in 1..fw - 1 {
        put(fx + i, fy,          '─');
        put(fx + i, fy + fh - 1, '─');
    }
    for j in 1..fh - 1 {
        put(fx,          fy + j, '│');
        put(fx + fw - 1, fy + j, '│');
    }
}

/// The screen shown before the start gesture: a glowing start control and
/// the key hints beneath it.
#[derive(Debug, Clone)]
pub struct TitleCard {
    pub hints: Vec<String>,
}

impl Resolve for TitleCard {
    fn resolve(&self, moment: &Moment, out: &mut ResolvedScene) {
        let control = StartControl::layout(moment.contract);

        // Glow one cell beyond the control, fill inside it.
        for (x, y) in moment.cells() {
            if control.contains(x, y) {
                push_wash(out, x, y, PURPLE_900, 0.3, 70);
                continue;
            }
            let halo = StartControl {
                x: control.x.saturating_sub(2),
                y: control.y.saturating_sub(1),
                width: control.width + 4,
                height: control.height + 2,
            };
            if halo.contains(x, y) {
                push_wash(out, x, y, PURPLE_600, 0.15, 70);
            }
        }

        draw_frame(&mut out.ops, &control, Style::fg(PURPLE_700), 80);
        let label = Style {
            bold: true,
            ..Style::fg(PURPLE_200)
        };
        push_text(
            out,
            control.x + 1 + PAD_X,
            control.y + 1 + PAD_Y,
            START_LABEL,
            label,
            1.0,
            80,
        );

        let hints_y = moment.contract.height.saturating_sub(2);
        if hints_y > control.y + control.height {
            let x = moment.contract.width.saturating_sub(menu_bar_width(&self.hints)) / 2;
            out.ops
                .extend(menu_bar_ops(&self.hints, x, hints_y, Style::fg(SLATE_400), 80));
        }
    }
}
