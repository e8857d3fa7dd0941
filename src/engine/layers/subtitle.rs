use crate::engine::animation::{SUBTITLE_FADE_MS, SUBTITLE_SHIFT_PX, Track};
use crate::engine::state::{Exit, Subtitle, Voice, erase_progress};
use crate::types::{DrawOp, ResolvedScene, Style, TerminalContract};

use super::palette::{GRAY_200, PURPLE_400};
use super::{Moment, Resolve, push_text};

/// Widest subtitle line, in cells (896px).
const MAX_LINE_CELLS: usize = 112;
/// Horizontal padding on each side, in cells (32px).
const SIDE_PADDING_CELLS: usize = 4;
/// Gap between the last subtitle line and the bottom edge, in cells (96px).
const BOTTOM_GAP_ROWS: u16 = 6;
/// Glyphs fainter than this are not drawn.
const MIN_OPACITY: f32 = 0.02;

/// Wrap a single line to `w` cells, breaking at spaces where possible.
///
/// The space at a break point is consumed so the next row never starts with
/// a stray space. Words longer than `w` are hard-broken.
fn wrap_text_line(line: &str, w: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() || w == 0 {
        return vec![String::new()];
    }
    let mut rows = Vec::new();
    let mut pos = 0usize;

    while pos < chars.len() {
        let remaining = &chars[pos..];
        if remaining.len() <= w {
            rows.push(remaining.iter().collect());
            break;
        }

        let chunk = &remaining[..w];
        let (row_len, advance) = match chunk.iter().rposition(|&c| c == ' ') {
            Some(sp) if sp > 0 => (sp, sp + 1),
            _ => (w, w),
        };
        rows.push(remaining[..row_len].iter().collect());
        pos += advance;

        while pos < chars.len() && chars[pos] == ' ' {
            pos += 1;
        }
    }
    rows
}

/// How a subtitle block is drawn at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pose {
    opacity: f32,
    shift_px: f32,
    /// Fraction of the text block, from the left, already wiped away.
    clip: f32,
    /// Opacity of the text line itself under the erase fade.
    text_opacity: f32,
}

fn entering(subtitle: &Subtitle, age_ms: f32) -> Pose {
    let opacity = Track::new(&[0.0, 1.0], SUBTITLE_FADE_MS).sample(age_ms);
    let shift_px = Track::new(&[SUBTITLE_SHIFT_PX, 0.0], SUBTITLE_FADE_MS).sample(age_ms);
    let (clip, text_opacity) = if subtitle.erase {
        erase_progress(age_ms)
    } else {
        (0.0, 1.0)
    };
    Pose {
        opacity,
        shift_px,
        clip,
        text_opacity,
    }
}

fn exiting(subtitle: &Subtitle, exit_ms: f32) -> Pose {
    let (clip, text_opacity) = if subtitle.erase {
        erase_progress(subtitle.age_ms(subtitle.shown_ms + exit_ms))
    } else {
        (0.0, 1.0)
    };
    match subtitle.exit {
        Exit::Hold => Pose {
            opacity: 1.0,
            shift_px: 0.0,
            clip,
            text_opacity,
        },
        Exit::FadeSlide => Pose {
            opacity: Track::new(&[1.0, 0.0], SUBTITLE_FADE_MS).sample(exit_ms),
            shift_px: Track::new(&[0.0, SUBTITLE_SHIFT_PX], SUBTITLE_FADE_MS).sample(exit_ms),
            clip,
            text_opacity,
        },
    }
}

/// Subtitle area. The outgoing line finishes its exit before the current
/// one starts its entry.
#[derive(Debug, Clone)]
pub struct Subtitles {
    pub current: Option<Subtitle>,
    pub outgoing: Option<Subtitle>,
}

impl Subtitles {
    /// Which subtitle is on screen at `elapsed_ms`, and how.
    fn active(&self, elapsed_ms: f32) -> Option<(&Subtitle, Pose)> {
        let entry_at = match &self.outgoing {
            Some(outgoing) if elapsed_ms < SUBTITLE_FADE_MS => {
                return Some((outgoing, exiting(outgoing, elapsed_ms)));
            }
            Some(_) => SUBTITLE_FADE_MS,
            None => 0.0,
        };
        self.current
            .as_ref()
            .map(|current| (current, entering(current, elapsed_ms - entry_at)))
    }
}

impl Resolve for Subtitles {
    fn resolve(&self, moment: &Moment, out: &mut ResolvedScene) {
        let Some((subtitle, pose)) = self.active(moment.elapsed_ms) else {
            return;
        };
        if pose.opacity < MIN_OPACITY {
            return;
        }

        let TerminalContract { width, height } = moment.contract;
        let wrap = MAX_LINE_CELLS.min((width as usize).saturating_sub(SIDE_PADDING_CELLS * 2));
        let lines: Vec<String> = subtitle
            .text
            .split('\n')
            .flat_map(|line| wrap_text_line(line, wrap.max(1)))
            .collect();

        let shift_rows = (pose.shift_px / TerminalContract::CELL_HEIGHT_PX).round() as u16;
        let block_rows = lines.len() as u16 + u16::from(subtitle.speaker.is_some());
        let bottom = height
            .saturating_sub(BOTTOM_GAP_ROWS)
            .saturating_add(shift_rows)
            .min(height.saturating_sub(1));
        let mut row = bottom.saturating_sub(block_rows.saturating_sub(1));

        let centred = |len: usize| (width as usize).saturating_sub(len) as u16 / 2;

        if let Some(speaker) = &subtitle.speaker {
            let style = Style {
                bold: true,
                ..Style::fg(PURPLE_400)
            };
            push_text(out, centred(speaker.chars().count()), row, speaker, style, pose.opacity, 50);
            row += 1;
        }

        let style = Style {
            italic: subtitle.voice == Voice::Radio,
            ..Style::fg(GRAY_200)
        };
        let text_opacity = pose.opacity * pose.text_opacity;
        if text_opacity < MIN_OPACITY {
            return;
        }
        let block_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let block_left = centred(block_width);
        let clip_cells = (pose.clip * block_width as f32).round() as u16;

        for line in &lines {
            let left = centred(line.chars().count());
            for (i, ch) in line.chars().enumerate() {
                let x = left + i as u16;
                if x < block_left + clip_cells {
                    continue;
                }
                out.ops.push(DrawOp {
                    x,
                    y: row,
                    ch,
                    style,
                    opacity: text_opacity,
                    z_order: 50,
                });
            }
            row += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::RenderState;
    use crate::script::Script;

    fn moment(elapsed_ms: f32) -> Moment {
        Moment {
            contract: TerminalContract { width: 80, height: 24 },
            elapsed_ms,
            clock_ms: 0.0,
        }
    }

    fn layer(cursor: usize) -> Subtitles {
        let state = RenderState::derive(&Script::builtin(), cursor);
        Subtitles {
            current: state.subtitle,
            outgoing: state.outgoing,
        }
    }

    fn text_of(out: &ResolvedScene) -> String {
        let mut ops: Vec<_> = out.ops.iter().collect();
        ops.sort_by_key(|op| (op.y, op.x));
        ops.iter().map(|op| op.ch).collect()
    }

    #[test]
    fn wraps_on_spaces() {
        assert_eq!(
            wrap_text_line("Они придут. Обещали.", 12),
            vec!["Они придут.", "Обещали."]
        );
    }

    #[test]
    fn hard_breaks_long_words() {
        assert_eq!(wrap_text_line("абвгдеж", 3), vec!["абв", "где", "ж"]);
    }

    #[test]
    fn enters_from_transparent() {
        let mut out = ResolvedScene::default();
        layer(1).resolve(&moment(0.0), &mut out);
        assert!(out.ops.is_empty());

        let mut out = ResolvedScene::default();
        layer(1).resolve(&moment(1_000.0), &mut out);
        assert_eq!(text_of(&out), "Игорь стоит на площади уже три часа...");
        assert!(out.ops.iter().all(|op| op.opacity == 1.0 && op.style.italic));
    }

    #[test]
    fn outgoing_line_exits_before_next_enters() {
        let mut out = ResolvedScene::default();
        layer(2).resolve(&moment(100.0), &mut out);
        assert_eq!(text_of(&out), "Игорь стоит на площади уже три часа...");

        let mut out = ResolvedScene::default();
        layer(2).resolve(&moment(2_500.0), &mut out);
        assert_eq!(text_of(&out), "ИГОРЬОни придут. Обещали.");
    }

    #[test]
    fn speaker_sits_above_the_line() {
        let mut out = ResolvedScene::default();
        layer(2).resolve(&moment(2_500.0), &mut out);
        let speaker_row = out.ops.iter().find(|op| op.ch == 'И').map(|op| op.y).unwrap();
        let text_row = out.ops.iter().find(|op| !op.style.bold).map(|op| op.y).unwrap();
        assert_eq!(text_row, speaker_row + 1);
        assert!(out.ops.iter().filter(|op| op.y == speaker_row).all(|op| op.style.bold));
    }

    #[test]
    fn erase_wipes_from_the_left() {
        // Scene 11 erases; its entry waits for scene 10's exit.
        let subtitles = layer(10);
        let mut early = ResolvedScene::default();
        subtitles.resolve(&moment(1_000.0 + 800.0), &mut early);
        let mut text_ops: Vec<_> = early.ops.iter().filter(|op| !op.style.bold).collect();
        text_ops.sort_by_key(|op| op.x);
        let visible: String = text_ops.iter().map(|op| op.ch).collect();
        assert_eq!(visible, " это я опоздал?");

        let mut done = ResolvedScene::default();
        subtitles.resolve(&moment(1_000.0 + 1_500.0), &mut done);
        assert!(!done.ops.is_empty());
        assert!(done.ops.iter().all(|op| op.style.bold));
    }

    #[test]
    fn short_erase_line_keeps_wiping_while_exiting() {
        // The erase line waits 1000ms behind "Раз." and is only shown for
        // 1000ms, so at its exit the wipe is two thirds through.
        let script = Script::from_json(
            r#"[
                {"id": 1, "kind": "narration", "text": "Раз.", "duration_ms": 3000},
                {"id": 2, "kind": "narration", "text": "Два три четыре", "duration_ms": 2000,
                 "effect": "erase"},
                {"id": 3, "kind": "atmosphere", "duration_ms": 3000}
            ]"#,
        )
        .unwrap();
        let state = RenderState::derive(&script, 2);
        let subtitles = Subtitles {
            current: state.subtitle,
            outgoing: state.outgoing,
        };

        let mut out = ResolvedScene::default();
        subtitles.resolve(&moment(0.0), &mut out);
        let visible = text_of(&out);
        assert!(!visible.is_empty());
        assert!("Два три четыре".ends_with(&visible));
        assert!(visible.chars().count() < "Два три четыре".chars().count());

        let mut later = ResolvedScene::default();
        subtitles.resolve(&moment(600.0), &mut later);
        assert!(later.ops.is_empty());
    }

    #[test]
    fn erased_line_stays_cleared_while_exiting() {
        // Scene 12 follows the erase scene.
        let mut out = ResolvedScene::default();
        layer(11).resolve(&moment(200.0), &mut out);
        assert!(out.ops.iter().all(|op| op.style.bold));
    }
}
