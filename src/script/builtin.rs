use super::{Atmosphere, Effect, Scene, SceneKind};

fn atmosphere(fog: f32, scar: f32) -> Option<Atmosphere> {
    Some(Atmosphere { fog, scar })
}

fn narration(id: u32, text: &str, duration_ms: u32) -> Scene {
    Scene {
        id,
        kind: SceneKind::Narration,
        text: Some(text.to_owned()),
        speaker: None,
        duration_ms,
        effect: None,
        atmosphere: None,
    }
}

fn igor(id: u32, text: &str, duration_ms: u32) -> Scene {
    Scene {
        id,
        kind: SceneKind::Dialogue,
        text: Some(text.to_owned()),
        speaker: Some("ИГОРЬ".to_owned()),
        duration_ms,
        effect: None,
        atmosphere: None,
    }
}

pub(super) fn scenes() -> Vec<Scene> {
    vec![
        Scene {
            id: 1,
            kind: SceneKind::Atmosphere,
            text: None,
            speaker: None,
            duration_ms: 4000,
            effect: None,
            atmosphere: atmosphere(0.8, 0.2),
        },
        Scene {
            atmosphere: atmosphere(0.9, 0.3),
            ..narration(2, "Игорь стоит на площади уже три часа...", 5000)
        },
        Scene {
            atmosphere: atmosphere(0.7, 0.4),
            ..igor(3, "Они придут. Обещали.", 4000)
        },
        Scene {
            effect: Some(Effect::Dissolve),
            atmosphere: atmosphere(1.0, 0.2),
            ..narration(4, "Туман сгущается. Силуэты размываются.", 5000)
        },
        Scene {
            atmosphere: atmosphere(0.9, 0.5),
            ..igor(5, "Где вы? Я здесь...", 4500)
        },
        Scene {
            effect: Some(Effect::Flash),
            atmosphere: atmosphere(0.6, 0.9),
            ..narration(6, "Фиолетовая вспышка прорезает тьму.", 3000)
        },
        Scene {
            atmosphere: atmosphere(0.8, 0.7),
            ..igor(7, "Это вы?", 3000)
        },
        Scene {
            atmosphere: atmosphere(1.0, 0.3),
            ..narration(8, "Но никто не отвечает.", 5000)
        },
        Scene {
            atmosphere: atmosphere(0.9, 0.4),
            ..igor(9, "Может, они уже были здесь?", 4000)
        },
        Scene {
            atmosphere: atmosphere(0.7, 0.5),
            ..narration(10, "Его дыхание становится тяжелым.", 4500)
        },
        Scene {
            effect: Some(Effect::Erase),
            atmosphere: atmosphere(1.0, 0.8),
            ..igor(11, "Или... это я опоздал?", 5000)
        },
        Scene {
            effect: Some(Effect::Flash),
            atmosphere: atmosphere(0.5, 1.0),
            ..narration(12, "Ещё одна вспышка.", 2000)
        },
        Scene {
            effect: Some(Effect::Dissolve),
            atmosphere: atmosphere(1.0, 0.1),
            ..narration(13, "И снова темнота.", 6000)
        },
    ]
}
