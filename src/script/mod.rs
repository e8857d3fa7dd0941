//! Script: the authored scene sequence.
//!
//! A `Script` is an ordered, immutable list of `Scene`s. It is validated once
//! at construction; after that every scene has a positive duration and every
//! intensity lies in [0, 1], so the timeline and engine never re-check.

mod builtin;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fog intensity used when a scene carries no atmosphere.
pub const DEFAULT_FOG: f32 = 0.8;
/// Scar intensity used when a scene carries no atmosphere.
pub const DEFAULT_SCAR: f32 = 0.3;
/// Fog intensity the silhouette blur assumes when a scene carries no
/// atmosphere. Lighter than the fog layers' default.
pub const DEFAULT_SILHOUETTE_FOG: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    Narration,
    Dialogue,
    Atmosphere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Dissolve,
    Flash,
    Erase,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    pub fog: f32,
    pub scar: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: u32,
    pub kind: SceneKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    pub duration_ms: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmosphere: Option<Atmosphere>,
}

impl Scene {
    pub fn fog_intensity(&self) -> f32 {
        self.atmosphere.map_or(DEFAULT_FOG, |a| a.fog)
    }

    pub fn scar_intensity(&self) -> f32 {
        self.atmosphere.map_or(DEFAULT_SCAR, |a| a.scar)
    }

    /// Fog intensity that drives the silhouette blur.
    pub fn silhouette_fog(&self) -> f32 {
        self.atmosphere.map_or(DEFAULT_SILHOUETTE_FOG, |a| a.fog)
    }

    /// Display text, if any. Empty strings count as no text.
    pub fn display_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    pub fn has_effect(&self, effect: Effect) -> bool {
        self.effect == Some(effect)
    }
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("script contains no scenes")]
    Empty,

    #[error("scene {id} has a zero duration")]
    ZeroDuration { id: u32 },

    #[error("scene id {id} appears more than once")]
    DuplicateId { id: u32 },

    #[error("scene {id}: {field} intensity {value} is outside [0, 1]")]
    IntensityOutOfRange {
        id: u32,
        field: &'static str,
        value: f32,
    },

    #[error("scene {id} has a speaker but is not a dialogue scene")]
    SpeakerOutsideDialogue { id: u32 },
}

/// An ordered, validated scene sequence. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Script {
    scenes: Vec<Scene>,
}

impl Script {
    pub fn new(scenes: Vec<Scene>) -> Result<Self, ScriptError> {
        if scenes.is_empty() {
            return Err(ScriptError::Empty);
        }

        let mut seen = std::collections::HashSet::with_capacity(scenes.len());
        for scene in &scenes {
            if !seen.insert(scene.id) {
                return Err(ScriptError::DuplicateId { id: scene.id });
            }
            if scene.duration_ms == 0 {
                return Err(ScriptError::ZeroDuration { id: scene.id });
            }
            if scene.speaker.is_some() && scene.kind != SceneKind::Dialogue {
                return Err(ScriptError::SpeakerOutsideDialogue { id: scene.id });
            }
            if let Some(atmosphere) = scene.atmosphere {
                for (field, value) in [("fog", atmosphere.fog), ("scar", atmosphere.scar)] {
                    if !(0.0..=1.0).contains(&value) {
                        return Err(ScriptError::IntensityOutOfRange {
                            id: scene.id,
                            field,
                            value,
                        });
                    }
                }
            }
        }

        Ok(Script { scenes })
    }

    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let scenes: Vec<Scene> = serde_json::from_str(json)?;
        Self::new(scenes)
    }

    /// The compiled-in thirteen-scene script.
    pub fn builtin() -> Self {
        Script {
            scenes: builtin::scenes(),
        }
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.scenes.len() - 1
    }

    /// Scene at `index`, clamped to the last scene.
    pub fn scene(&self, index: usize) -> &Scene {
        &self.scenes[index.min(self.last_index())]
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.scenes.iter().map(|s| u64::from(s.duration_ms)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(id: u32, kind: SceneKind) -> Scene {
        Scene {
            id,
            kind,
            text: None,
            speaker: None,
            duration_ms: 1000,
            effect: None,
            atmosphere: None,
        }
    }

    #[test]
    fn builtin_script_is_valid() {
        let script = Script::builtin();
        assert_eq!(script.len(), 13);
        let revalidated = Script::new(script.scenes().to_vec()).unwrap();
        assert_eq!(revalidated, script);
    }

    #[test]
    fn builtin_ids_follow_array_order() {
        let script = Script::builtin();
        for (i, scene) in script.scenes().iter().enumerate() {
            assert_eq!(scene.id as usize, i + 1);
        }
    }

    #[test]
    fn empty_script_is_rejected() {
        assert!(matches!(Script::new(Vec::new()), Err(ScriptError::Empty)));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let mut s = scene(4, SceneKind::Narration);
        s.duration_ms = 0;
        assert!(matches!(
            Script::new(vec![s]),
            Err(ScriptError::ZeroDuration { id: 4 })
        ));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let err = Script::new(vec![
            scene(1, SceneKind::Narration),
            scene(1, SceneKind::Atmosphere),
        ])
        .unwrap_err();
        assert!(matches!(err, ScriptError::DuplicateId { id: 1 }));
    }

    #[test]
    fn speaker_requires_dialogue() {
        let mut s = scene(2, SceneKind::Narration);
        s.speaker = Some("ИГОРЬ".into());
        assert!(matches!(
            Script::new(vec![s]),
            Err(ScriptError::SpeakerOutsideDialogue { id: 2 })
        ));
    }

    #[test]
    fn intensity_out_of_range_is_rejected() {
        let mut s = scene(3, SceneKind::Atmosphere);
        s.atmosphere = Some(Atmosphere { fog: 1.2, scar: 0.1 });
        let err = Script::new(vec![s]).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::IntensityOutOfRange { id: 3, field: "fog", .. }
        ));
    }

    #[test]
    fn missing_atmosphere_uses_defaults() {
        let s = scene(1, SceneKind::Atmosphere);
        assert_eq!(s.fog_intensity(), DEFAULT_FOG);
        assert_eq!(s.scar_intensity(), DEFAULT_SCAR);
    }

    #[test]
    fn empty_text_is_no_text() {
        let mut s = scene(1, SceneKind::Narration);
        s.text = Some(String::new());
        assert_eq!(s.display_text(), None);
    }

    #[test]
    fn scene_index_is_clamped() {
        let script = Script::builtin();
        assert_eq!(script.scene(99).id, 13);
    }

    #[test]
    fn json_round_trip_of_builtin() {
        let json = serde_json::to_string(&Script::builtin()).unwrap();
        let parsed = Script::from_json(&json).unwrap();
        assert_eq!(parsed, Script::builtin());
    }

    #[test]
    fn parses_authored_json() {
        let json = r#"[
            {"id": 1, "kind": "atmosphere", "duration_ms": 4000},
            {"id": 2, "kind": "dialogue", "speaker": "ИГОРЬ", "text": "Это вы?",
             "duration_ms": 3000, "effect": "flash",
             "atmosphere": {"fog": 0.8, "scar": 0.7}}
        ]"#;
        let script = Script::from_json(json).unwrap();
        assert_eq!(script.len(), 2);
        assert_eq!(script.scene(1).effect, Some(Effect::Flash));
        assert_eq!(script.scene(1).speaker.as_deref(), Some("ИГОРЬ"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            Script::from_json("{not json"),
            Err(ScriptError::Parse(_))
        ));
    }
}
