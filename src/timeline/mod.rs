//! Timeline: the playback state machine and its advance scheduler.
//!
//! `PlaybackState` is a plain value updated by discrete `Action`s; it knows
//! nothing about time. `Timeline` pairs it with a `Scheduler` so that every
//! scene entry arms exactly one single-shot timer for that scene's duration.

pub mod clock;
pub mod scheduler;

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::script::{Scene, Script};
use clock::{Clock, SystemClock};
use scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Advance,
}

/// Outcome of applying an `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started,
    Advanced { from: usize, to: usize },
    /// Advance on the terminal scene; it holds forever.
    Held,
    /// Start after already started, or advance before starting.
    Ignored,
}

impl Transition {
    /// True when the current scene changed (including the initial entry).
    pub fn entered_scene(self) -> bool {
        matches!(self, Transition::Started | Transition::Advanced { .. })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackState {
    started: bool,
    cursor: usize,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Apply `action` against a sequence of `scene_count` scenes.
    pub fn apply(&mut self, action: Action, scene_count: usize) -> Transition {
        match action {
            Action::Start if self.started => Transition::Ignored,
            Action::Start => {
                self.started = true;
                Transition::Started
            }
            Action::Advance if !self.started => Transition::Ignored,
            Action::Advance => {
                let last = scene_count.saturating_sub(1);
                if self.cursor < last {
                    let from = self.cursor;
                    self.cursor += 1;
                    Transition::Advanced {
                        from,
                        to: self.cursor,
                    }
                } else {
                    Transition::Held
                }
            }
        }
    }
}

/// Drives a `Script` through time.
#[derive(Debug)]
pub struct Timeline<C: Clock = SystemClock> {
    script: Script,
    state: PlaybackState,
    scheduler: Scheduler<C>,
    started_at: Option<Instant>,
    entered_at: Option<Instant>,
}

impl Timeline<SystemClock> {
    pub fn new(script: Script) -> Self {
        Self::with_clock(script, SystemClock)
    }
}

impl<C: Clock> Timeline<C> {
    pub fn with_clock(script: Script, clock: C) -> Self {
        Timeline {
            script,
            state: PlaybackState::new(),
            scheduler: Scheduler::new(clock),
            started_at: None,
            entered_at: None,
        }
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn current_scene(&self) -> &Scene {
        self.script.scene(self.state.cursor)
    }

    pub fn is_terminal(&self) -> bool {
        self.state.cursor == self.script.last_index()
    }

    /// Time spent in the current scene. Zero before playback starts.
    pub fn elapsed_in_scene(&self) -> Duration {
        self.entered_at.map_or(Duration::ZERO, |at| {
            self.scheduler.clock().now().saturating_duration_since(at)
        })
    }

    /// Time since playback started. Zero before it starts.
    pub fn elapsed_since_start(&self) -> Duration {
        self.started_at.map_or(Duration::ZERO, |at| {
            self.scheduler.clock().now().saturating_duration_since(at)
        })
    }

    /// Time until the pending advance is due, if one is armed.
    pub fn until_next_advance(&self) -> Option<Duration> {
        self.scheduler.remaining()
    }

    pub fn timer_armed(&self) -> bool {
        self.scheduler.is_armed()
    }

    pub fn start(&mut self) -> Transition {
        self.dispatch(Action::Start)
    }

    /// Advance immediately, superseding any pending timer.
    pub fn advance(&mut self) -> Transition {
        self.dispatch(Action::Advance)
    }

    /// Fire the advance timer if it is due. Returns the transition it caused.
    pub fn tick(&mut self) -> Option<Transition> {
        let fired = self.scheduler.poll(self.state.cursor)?;
        debug!(cursor = fired.cursor, "scene duration elapsed");
        Some(self.dispatch(Action::Advance))
    }

    /// Cancel any pending timer. Playback state is left as is.
    pub fn teardown(&mut self) {
        self.scheduler.cancel();
    }

    fn dispatch(&mut self, action: Action) -> Transition {
        let transition = self.state.apply(action, self.script.len());
        if transition == Transition::Started {
            info!(scenes = self.script.len(), "playback started");
            self.started_at = Some(self.scheduler.clock().now());
        }
        if transition.entered_scene() {
            self.enter_current_scene();
        }
        transition
    }

    fn enter_current_scene(&mut self) {
        let cursor = self.state.cursor;
        let scene = self.script.scene(cursor);
        info!(
            id = scene.id,
            kind = ?scene.kind,
            duration_ms = scene.duration_ms,
            "scene entered"
        );
        let duration = Duration::from_millis(u64::from(scene.duration_ms));
        self.entered_at = Some(self.scheduler.clock().now());
        self.scheduler.arm(cursor, duration);
    }
}
