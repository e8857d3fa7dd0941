use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Play the ambient hum when the device allows it.
    #[serde(default = "default_audio")]
    pub audio: bool,
    /// Redraw cadence while a scene is on screen.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    #[serde(default)]
    pub key_bindings: KeyBindings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default = "default_quit")]
    pub quit: String,
}

fn default_audio() -> bool { true }
fn default_frame_interval_ms() -> u64 { 33 }
fn default_start() -> String { "Enter".into() }
fn default_quit() -> String { "q".into() }

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            start: default_start(),
            quit: default_quit(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            audio: default_audio(),
            frame_interval_ms: default_frame_interval_ms(),
            key_bindings: KeyBindings::default(),
        }
    }
}

impl PlayerConfig {
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(json) => Self::parse(&json).unwrap_or_else(|e| {
                warn!(path = %config_path.display(), error = %e, "invalid player config, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: PlayerConfig = serde_json::from_str(json)?;
        config.frame_interval_ms = config.frame_interval_ms.max(1);
        Ok(config)
    }

    fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("fogline");
        path.push("player.json");
        path
    }

    /// Key hints for the title screen, e.g. `[Enter] начать`.
    pub fn hints(&self) -> Vec<String> {
        vec![
            format!("[{}] начать", self.key_bindings.start),
            format!("[{}] выход", self.key_bindings.quit),
        ]
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    if let Some(rest) = binding.strip_prefix("Alt-") {
        if !event.modifiers.contains(KeyModifiers::ALT) {
            return false;
        }
        return matches_key(rest, event.code);
    }

    if let Some(rest) = binding.strip_prefix("Ctrl-") {
        if !event.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        return matches_key(rest, event.code);
    }

    // Plain bindings must not fire on Ctrl- or Alt- chords.
    if event.modifiers.contains(KeyModifiers::CONTROL)
        || event.modifiers.contains(KeyModifiers::ALT)
    {
        return false;
    }

    matches_key(binding, event.code)
}

fn matches_key(name: &str, code: KeyCode) -> bool {
    match name {
        "Enter" => code == KeyCode::Enter,
        "Esc" => code == KeyCode::Esc,
        "Space" => code == KeyCode::Char(' '),
        "Tab" => code == KeyCode::Tab,
        "Backspace" => code == KeyCode::Backspace,
        s => {
            if let Some(rest) = s.strip_prefix('F') {
                if let Ok(n) = rest.parse::<u8>() {
                    return code == KeyCode::F(n);
                }
            }
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => code == KeyCode::Char(c),
                _ => false,
            }
        }
    }
}

/// Ctrl-C always leaves, whatever the bindings say.
pub fn is_interrupt(event: &KeyEvent) -> bool {
    event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn empty_object_uses_defaults() {
        assert_eq!(PlayerConfig::parse("{}").unwrap(), PlayerConfig::default());
    }

    #[test]
    fn partial_bindings_keep_other_defaults() {
        let config = PlayerConfig::parse(r#"{"audio": false, "key_bindings": {"quit": "Esc"}}"#)
            .unwrap();
        assert!(!config.audio);
        assert_eq!(config.key_bindings.quit, "Esc");
        assert_eq!(config.key_bindings.start, "Enter");
    }

    #[test]
    fn frame_interval_is_never_zero() {
        let config = PlayerConfig::parse(r#"{"frame_interval_ms": 0}"#).unwrap();
        assert_eq!(config.frame_interval_ms, 1);
    }

    #[test]
    fn bindings_match_keys() {
        assert!(matches_binding("Enter", &key(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(matches_binding("q", &key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(!matches_binding("q", &key(KeyCode::Char('q'), KeyModifiers::ALT)));
        assert!(matches_binding("Ctrl-q", &key(KeyCode::Char('q'), KeyModifiers::CONTROL)));
        assert!(matches_binding("F5", &key(KeyCode::F(5), KeyModifiers::NONE)));
        assert!(matches_binding("Space", &key(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert!(!matches_binding("qq", &key(KeyCode::Char('q'), KeyModifiers::NONE)));
    }

    #[test]
    fn ctrl_c_is_an_interrupt() {
        assert!(is_interrupt(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_interrupt(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn hints_name_the_bindings() {
        assert_eq!(
            PlayerConfig::default().hints(),
            vec!["[Enter] начать".to_string(), "[q] выход".to_string()]
        );
    }
}
