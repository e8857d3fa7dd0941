//! Whole-pipeline checks: timeline → engine → rasterized grid.

use fogline::config::PlayerConfig;
use fogline::engine::Engine;
use fogline::engine::layers::StartControl;
use fogline::renderer::{Renderer, row_text};
use fogline::script::Script;
use fogline::timeline::Timeline;
use fogline::timeline::clock::ManualClock;
use fogline::types::{Cell, Frame, TerminalContract};

const CONTRACT: TerminalContract = TerminalContract {
    width: 80,
    height: 24,
};
/// Row holding the last subtitle line on a 24-row terminal.
const SUBTITLE_ROW: usize = 18;

fn snapshot(timeline: &Timeline<&ManualClock>) -> Vec<Vec<Cell>> {
    let scene = Engine::compose(
        timeline.script(),
        timeline.cursor(),
        timeline.elapsed_in_scene(),
        timeline.elapsed_since_start(),
        CONTRACT,
    );
    Renderer::rasterize(&scene, &CONTRACT)
}

fn text_rows(grid: &[Vec<Cell>]) -> Vec<String> {
    (3..grid.len())
        .map(|y| row_text(grid, y).trim().to_string())
        .filter(|row| !row.is_empty())
        .collect()
}

#[test]
fn opening_scene_has_no_subtitle() {
    let clock = ManualClock::new();
    let mut timeline = Timeline::with_clock(Script::builtin(), &clock);
    timeline.start();
    clock.advance_ms(2000);
    assert!(text_rows(&snapshot(&timeline)).is_empty());
}

#[test]
fn narration_appears_after_opening_scene() {
    let clock = ManualClock::new();
    let mut timeline = Timeline::with_clock(Script::builtin(), &clock);
    timeline.start();

    clock.advance_ms(4000);
    timeline.tick();
    assert_eq!(timeline.current_scene().id, 2);

    clock.advance_ms(1000);
    let grid = snapshot(&timeline);
    assert_eq!(
        text_rows(&grid),
        vec!["Игорь стоит на площади уже три часа...".to_string()]
    );
    let row = row_text(&grid, SUBTITLE_ROW);
    let first = row.chars().position(|c| c != ' ').unwrap();
    assert!(grid[SUBTITLE_ROW][first].style.italic);
}

#[test]
fn dialogue_shows_speaker_above_text() {
    let clock = ManualClock::new();
    let mut timeline = Timeline::with_clock(Script::builtin(), &clock);
    timeline.start();
    clock.advance_ms(4000);
    timeline.tick();
    clock.advance_ms(5000);
    timeline.tick();
    assert_eq!(timeline.current_scene().id, 3);

    // Previous line leaves, then this one fades in.
    clock.advance_ms(2000);
    let grid = snapshot(&timeline);
    assert_eq!(row_text(&grid, SUBTITLE_ROW - 1).trim(), "ИГОРЬ");
    assert_eq!(row_text(&grid, SUBTITLE_ROW).trim(), "Они придут. Обещали.");

    let speaker_row = row_text(&grid, SUBTITLE_ROW - 1);
    let first = speaker_row.chars().position(|c| c != ' ').unwrap();
    let style = grid[SUBTITLE_ROW - 1][first].style;
    assert!(style.bold && !style.italic);
}

#[test]
fn progress_tracks_current_scene() {
    let clock = ManualClock::new();
    let mut timeline = Timeline::with_clock(Script::builtin(), &clock);
    timeline.start();
    clock.advance_ms(4000);
    timeline.tick();

    let grid = snapshot(&timeline);
    let progress = row_text(&grid, 2);
    assert_eq!(progress.trim(), "• ━━━━ • • • • • • • • • • •");
}

#[test]
fn frames_diff_after_the_first() {
    let clock = ManualClock::new();
    let mut timeline = Timeline::with_clock(Script::builtin(), &clock);
    timeline.start();
    let mut renderer = Renderer::new(CONTRACT);

    let compose = |timeline: &Timeline<&ManualClock>| {
        Engine::compose(
            timeline.script(),
            timeline.cursor(),
            timeline.elapsed_in_scene(),
            timeline.elapsed_since_start(),
            CONTRACT,
        )
    };

    assert!(matches!(renderer.render(&compose(&timeline)), Frame::Full { .. }));
    match renderer.render(&compose(&timeline)) {
        Frame::Diff { changes } => assert!(changes.is_empty()),
        Frame::Full { .. } => panic!("second frame should be a diff"),
    }

    renderer.invalidate(TerminalContract {
        width: 60,
        height: 20,
    });
    assert!(matches!(renderer.render(&compose(&timeline)), Frame::Full { .. }));
}

#[test]
fn title_screen_offers_start() {
    let scene = Engine::compose_title(PlayerConfig::default().hints(), CONTRACT);
    let grid = Renderer::rasterize(&scene, &CONTRACT);
    let control = StartControl::layout(CONTRACT);

    let label_row = row_text(&grid, usize::from(control.y + 2));
    assert!(label_row.contains("НАЧАТЬ"));
    assert!(row_text(&grid, 22).contains("[Enter] начать  [q] выход"));
    assert!(control.contains(control.x + control.width / 2, control.y + 2));
    assert!(!control.contains(0, 0));
}
