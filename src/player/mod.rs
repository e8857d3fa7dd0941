//! Player: the interactive runtime.
//!
//! Shows the title screen until the start gesture (a click on the start
//! control, or the start key), then drives the timeline and redraws the
//! composed scene at a fixed cadence. The terminal is restored and the
//! advance timer cancelled however the loop ends.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::{cursor, execute, queue, style, terminal};
use tracing::{info, warn};

use crate::audio::{self, AmbientHandle, AudioContext, AudioError};
use crate::config::{PlayerConfig, is_interrupt, matches_binding};
use crate::engine::Engine;
use crate::engine::layers::StartControl;
use crate::renderer::Renderer;
use crate::script::Script;
use crate::timeline::{Timeline, Transition};
use crate::types::{Cell, CellChange, Frame, Rgb, Style, TerminalContract};

/// What a key or mouse event means on the title screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Start,
    Quit,
    None,
}

pub struct Player {
    timeline: Timeline,
    config: PlayerConfig,
    renderer: Renderer,
    // Held for its lifetime: dropping the context silences the hum.
    audio: Option<(Box<dyn AudioContext>, AmbientHandle)>,
}

impl Player {
    pub fn new(script: Script, config: PlayerConfig) -> Self {
        Self {
            timeline: Timeline::new(script),
            config,
            renderer: Renderer::new(TerminalContract { width: 80, height: 24 }),
            audio: None,
        }
    }

    /// Play the script in the terminal.
    ///
    /// Sets up the terminal, enters the event loop, and restores the terminal
    /// on exit (even on error).
    pub fn play(&mut self) -> Result<()> {
        let (width, height) = terminal::size()?;
        self.renderer.invalidate(TerminalContract { width, height });

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let result = self.run_loop(&mut stdout);

        // Always restore terminal state.
        self.timeline.teardown();
        self.audio = None;
        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();

        result
    }

    // -----------------------------------------------------------------------
    // Event loop
    // -----------------------------------------------------------------------

    fn run_loop(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        if !self.title_screen(stdout)? {
            info!("quit from title screen");
            return Ok(());
        }
        self.start();

        let frame_interval = Duration::from_millis(self.config.frame_interval_ms);
        loop {
            if let Some(Transition::Held) = self.timeline.tick() {
                info!("final scene reached");
            }
            self.draw_scene(stdout)?;

            let wait = self
                .timeline
                .until_next_advance()
                .map_or(frame_interval, |due| due.min(frame_interval));
            if !event::poll(wait)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if self.is_quit(&key) => break,
                Event::Resize(width, height) => self.resize(stdout, width, height)?,
                _ => {}
            }
        }

        info!(cursor = self.timeline.cursor(), "playback stopped");
        Ok(())
    }

    /// Block on the title screen. Returns false if the user quit.
    fn title_screen(&mut self, stdout: &mut io::Stdout) -> Result<bool> {
        self.draw_title(stdout)?;
        loop {
            let gesture = match event::read()? {
                Event::Key(key) => self.key_gesture(&key),
                Event::Mouse(mouse) => self.mouse_gesture(&mouse),
                Event::Resize(width, height) => {
                    self.resize(stdout, width, height)?;
                    self.draw_title(stdout)?;
                    Gesture::None
                }
                _ => Gesture::None,
            };
            match gesture {
                Gesture::Start => return Ok(true),
                Gesture::Quit => return Ok(false),
                Gesture::None => {}
            }
        }
    }

    /// Start playback and, within the same gesture, the ambient sound.
    fn start(&mut self) {
        self.start_with(audio::open_default_context);
    }

    /// Start playback, opening the audio context with `open`. Sound failures
    /// are logged and never stop the visuals.
    fn start_with(&mut self, open: impl FnOnce() -> Result<Box<dyn AudioContext>, AudioError>) {
        if self.timeline.start() != Transition::Started {
            return;
        }
        if !self.config.audio {
            info!("ambient sound disabled by config");
            return;
        }
        let started = open().and_then(|mut context| {
            let handle = audio::start_ambient(context.as_mut())?;
            Ok((context, handle))
        });
        match started {
            Ok(audio) => self.audio = Some(audio),
            Err(e) => warn!(error = %e, "ambient sound unavailable, continuing silently"),
        }
    }

    fn key_gesture(&self, key: &KeyEvent) -> Gesture {
        if key.kind != KeyEventKind::Press {
            Gesture::None
        } else if self.is_quit(key) {
            Gesture::Quit
        } else if matches_binding(&self.config.key_bindings.start, key) {
            Gesture::Start
        } else {
            Gesture::None
        }
    }

    fn mouse_gesture(&self, mouse: &MouseEvent) -> Gesture {
        let control = StartControl::layout(self.renderer.contract());
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if control.contains(mouse.column, mouse.row) => {
                Gesture::Start
            }
            _ => Gesture::None,
        }
    }

    fn is_quit(&self, key: &KeyEvent) -> bool {
        key.kind == KeyEventKind::Press
            && (is_interrupt(key) || matches_binding(&self.config.key_bindings.quit, key))
    }

    fn resize(&mut self, stdout: &mut io::Stdout, width: u16, height: u16) -> Result<()> {
        self.renderer.invalidate(TerminalContract { width, height });
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Terminal output
    // -----------------------------------------------------------------------

    fn draw_title(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        let scene = Engine::compose_title(self.config.hints(), self.renderer.contract());
        let frame = self.renderer.render(&scene);
        write_frame(stdout, &frame)
    }

    fn draw_scene(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        let scene = Engine::compose(
            self.timeline.script(),
            self.timeline.cursor(),
            self.timeline.elapsed_in_scene(),
            self.timeline.elapsed_since_start(),
            self.renderer.contract(),
        );
        let frame = self.renderer.render(&scene);
        write_frame(stdout, &frame)
    }
}

fn write_frame(stdout: &mut io::Stdout, frame: &Frame) -> Result<()> {
    match frame {
        Frame::Full { cells } => write_full(stdout, cells)?,
        Frame::Diff { changes } => write_diff(stdout, changes)?,
    }
    stdout.flush()?;
    Ok(())
}

fn write_full(stdout: &mut io::Stdout, grid: &[Vec<Cell>]) -> Result<()> {
    for (y, row) in grid.iter().enumerate() {
        queue!(stdout, cursor::MoveTo(0, y as u16))?;
        for cell in row {
            let cs = to_content_style(&cell.style);
            queue!(
                stdout,
                style::PrintStyledContent(style::StyledContent::new(cs, cell.ch))
            )?;
        }
    }
    Ok(())
}

fn write_diff(stdout: &mut io::Stdout, changes: &[CellChange]) -> Result<()> {
    for change in changes {
        let cs = to_content_style(&change.cell.style);
        queue!(
            stdout,
            cursor::MoveTo(change.x, change.y),
            style::PrintStyledContent(style::StyledContent::new(cs, change.cell.ch)),
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Style conversion
// ---------------------------------------------------------------------------

pub fn to_content_style(s: &Style) -> style::ContentStyle {
    let mut cs = style::ContentStyle::default();
    if let Some(fg) = s.fg {
        cs.foreground_color = Some(to_ct_color(fg));
    }
    if let Some(bg) = s.bg {
        cs.background_color = Some(to_ct_color(bg));
    }
    if s.bold {
        cs.attributes.set(style::Attribute::Bold);
    }
    if s.dim {
        cs.attributes.set(style::Attribute::Dim);
    }
    if s.italic {
        cs.attributes.set(style::Attribute::Italic);
    }
    cs
}

pub fn to_ct_color(c: Rgb) -> style::Color {
    style::Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}
