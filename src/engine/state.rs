//! Render state: every visual parameter derived from the current scene.
//!
//! Derivation is pure: it takes the script and a cursor and never looks at
//! time. Layers sample the animations named here against elapsed time.

use crate::script::{Effect, Scene, SceneKind, Script};

use super::animation::{
    DISSOLVE_BLUR_PX, DISSOLVE_MS, ERASE_MS, Easing, FLASH_MS, FLASH_STAGGER_MS,
    SUBTITLE_FADE_MS, Track,
};

/// Opacity multipliers of the three fog parallax layers.
pub const FOG_LAYER_FACTORS: [f32; 3] = [1.0, 0.7, 0.5];
/// Opacity multipliers of the two scar-flash regions.
pub const SCAR_REGION_FACTORS: [f32; 2] = [1.0, 0.7];
/// Silhouette blur in pixels per unit of fog intensity.
pub const BLUR_PER_FOG_PX: f32 = 8.0;

static PULSE_PRIMARY_OPACITY: [f32; 3] = [0.0, 1.0, 0.0];
static PULSE_PRIMARY_SCALE: [f32; 3] = [0.5, 1.5, 0.5];
static PULSE_SECONDARY_OPACITY: [f32; 3] = [0.0, 0.8, 0.0];
static PULSE_SECONDARY_SCALE: [f32; 3] = [0.7, 1.3, 0.7];

/// Opacity/scale pulse played by a scar region during a flash scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashPulse {
    pub opacity: Track<'static>,
    pub scale: Track<'static>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScarRegion {
    pub opacity: f32,
    pub pulse: Option<FlashPulse>,
}

impl ScarRegion {
    /// (opacity, scale) at `elapsed_ms` into the scene.
    pub fn sample(&self, elapsed_ms: f32) -> (f32, f32) {
        match &self.pulse {
            Some(pulse) => (pulse.opacity.sample(elapsed_ms), pulse.scale.sample(elapsed_ms)),
            None => (self.opacity, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Silhouette {
    pub blur_px: f32,
    pub dissolve: bool,
}

impl Silhouette {
    /// (opacity, blur radius in px) at `elapsed_ms` into the scene.
    pub fn sample(&self, elapsed_ms: f32) -> (f32, f32) {
        if !self.dissolve {
            return (1.0, self.blur_px);
        }
        let opacity = Track::new(&[1.0, 0.0], DISSOLVE_MS).sample(elapsed_ms);
        let blur = Track::new(&[self.blur_px, DISSOLVE_BLUR_PX], DISSOLVE_MS).sample(elapsed_ms);
        (opacity, blur)
    }
}

/// How a line of text is voiced on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Voice {
    /// Narration: the monospace, italic "radio" voice.
    Radio,
    Plain,
}

/// How a subtitle leaves the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Fade out while sliding down.
    FadeSlide,
    /// Hold opacity and position; the erase wipe has already cleared it.
    Hold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subtitle {
    pub scene_id: u32,
    pub text: String,
    pub speaker: Option<String>,
    pub voice: Voice,
    pub exit: Exit,
    pub erase: bool,
    /// How long the owning scene stays current.
    pub shown_ms: f32,
    /// Time into the owning scene before the line starts entering: the
    /// previous line's exit, when there was one.
    pub entry_delay_ms: f32,
}

impl Subtitle {
    pub fn of(scene: &Scene) -> Option<Self> {
        let text = scene.display_text()?;
        let erase = scene.has_effect(Effect::Erase);
        Some(Subtitle {
            scene_id: scene.id,
            text: text.to_owned(),
            speaker: match scene.kind {
                SceneKind::Dialogue => scene.speaker.clone().filter(|s| !s.is_empty()),
                _ => None,
            },
            voice: match scene.kind {
                SceneKind::Narration => Voice::Radio,
                _ => Voice::Plain,
            },
            exit: if erase { Exit::Hold } else { Exit::FadeSlide },
            erase,
            shown_ms: scene.duration_ms as f32,
            entry_delay_ms: 0.0,
        })
    }

    /// The subtitle of `script`'s scene at `index`, with its entry delay.
    pub fn at(script: &Script, index: usize) -> Option<Self> {
        let mut subtitle = Self::of(script.scene(index))?;
        let waits = index
            .checked_sub(1)
            .is_some_and(|prev| script.scene(prev).display_text().is_some());
        if waits {
            subtitle.entry_delay_ms = SUBTITLE_FADE_MS;
        }
        Some(subtitle)
    }

    /// Time since the line started entering, at `elapsed_ms` into its scene.
    pub fn age_ms(&self, elapsed_ms: f32) -> f32 {
        elapsed_ms - self.entry_delay_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Past,
    Current,
    Future,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub fog: [f32; 3],
    pub scar: [ScarRegion; 2],
    pub silhouette: Silhouette,
    pub subtitle: Option<Subtitle>,
    /// Subtitle of the previous scene, still playing its exit.
    pub outgoing: Option<Subtitle>,
    pub progress: Vec<Marker>,
}

impl RenderState {
    pub fn derive(script: &Script, cursor: usize) -> Self {
        let cursor = cursor.min(script.last_index());
        let scene = script.scene(cursor);

        let fog = scene.fog_intensity();
        let scar = scene.scar_intensity();
        let flash = scene.has_effect(Effect::Flash);

        RenderState {
            fog: fog_opacities(fog),
            scar: [
                ScarRegion {
                    opacity: scar * SCAR_REGION_FACTORS[0],
                    pulse: flash.then_some(FlashPulse {
                        opacity: Track::new(&PULSE_PRIMARY_OPACITY, FLASH_MS),
                        scale: Track::new(&PULSE_PRIMARY_SCALE, FLASH_MS),
                    }),
                },
                ScarRegion {
                    opacity: scar * SCAR_REGION_FACTORS[1],
                    pulse: flash.then_some(FlashPulse {
                        opacity: Track::new(&PULSE_SECONDARY_OPACITY, FLASH_MS)
                            .delay(FLASH_STAGGER_MS),
                        scale: Track::new(&PULSE_SECONDARY_SCALE, FLASH_MS)
                            .delay(FLASH_STAGGER_MS),
                    }),
                },
            ],
            silhouette: Silhouette {
                blur_px: scene.silhouette_fog() * BLUR_PER_FOG_PX,
                dissolve: scene.has_effect(Effect::Dissolve),
            },
            subtitle: Subtitle::at(script, cursor),
            outgoing: cursor
                .checked_sub(1)
                .and_then(|prev| Subtitle::at(script, prev)),
            progress: (0..script.len())
                .map(|i| match i.cmp(&cursor) {
                    std::cmp::Ordering::Less => Marker::Past,
                    std::cmp::Ordering::Equal => Marker::Current,
                    std::cmp::Ordering::Greater => Marker::Future,
                })
                .collect(),
        }
    }

    /// Scar opacities before any flash pulse is applied.
    pub fn scar_opacities(&self) -> [f32; 2] {
        [self.scar[0].opacity, self.scar[1].opacity]
    }

    pub fn flashes(&self) -> bool {
        self.scar.iter().any(|r| r.pulse.is_some())
    }
}

pub fn fog_opacities(fog: f32) -> [f32; 3] {
    FOG_LAYER_FACTORS.map(|f| fog * f)
}

/// Erase wipe at `age_ms` since the subtitle appeared: (clip fraction from
/// the left edge, opacity).
pub fn erase_progress(age_ms: f32) -> (f32, f32) {
    let wipe = Track::new(&[0.0, 1.0], ERASE_MS).easing(Easing::EaseIn);
    let fade = Track::new(&[1.0, 0.0], ERASE_MS).easing(Easing::EaseIn);
    (wipe.sample(age_ms), fade.sample(age_ms))
}
