//! Engine: the scene compositor.
//!
//! Turns the current point of the timeline into a `ResolvedScene` (concrete
//! washes and glyphs). `RenderState` derives what the scene looks like;
//! layers sample it against time.
//!
//! The engine understands scenes, time and animation. It never deals with
//! terminals, ANSI codes, or grids.

pub mod animation;
pub mod layers;
pub mod state;

use std::time::Duration;

use crate::script::Script;
use crate::types::{ResolvedScene, TerminalContract};
use layers::{
    Anchor, Backdrop, FogLayer, Layer, Moment, Progress, Resolve, ScarFlash, SilhouetteLayer,
    Subtitles, TitleCard, Vignette,
};
use state::RenderState;

pub struct Engine;

impl Engine {
    /// Compose the scene at `cursor`, `elapsed` into that scene and `clock`
    /// into playback.
    pub fn compose(
        script: &Script,
        cursor: usize,
        elapsed: Duration,
        clock: Duration,
        contract: TerminalContract,
    ) -> ResolvedScene {
        let state = RenderState::derive(script, cursor);
        let moment = Moment {
            contract,
            elapsed_ms: elapsed.as_secs_f32() * 1000.0,
            clock_ms: clock.as_secs_f32() * 1000.0,
        };
        Self::resolve(&Self::layers(state), &moment)
    }

    /// Compose the title screen shown before playback starts.
    pub fn compose_title(hints: Vec<String>, contract: TerminalContract) -> ResolvedScene {
        let moment = Moment {
            contract,
            elapsed_ms: 0.0,
            clock_ms: 0.0,
        };
        let layers = [
            Layer::Backdrop(Backdrop),
            Layer::Title(TitleCard { hints }),
        ];
        Self::resolve(&layers, &moment)
    }

    /// Back-to-front layer stack for a render state.
    pub fn layers(state: RenderState) -> Vec<Layer> {
        let RenderState {
            fog,
            scar,
            silhouette,
            subtitle,
            outgoing,
            progress,
        } = state;

        let mut layers = vec![Layer::Backdrop(Backdrop)];
        layers.extend(
            fog.into_iter()
                .enumerate()
                .map(|(index, opacity)| Layer::Fog(FogLayer { index, opacity })),
        );
        layers.push(Layer::Scar(ScarFlash {
            anchor: Anchor::Upper,
            region: scar[0],
        }));
        layers.push(Layer::Scar(ScarFlash {
            anchor: Anchor::Lower,
            region: scar[1],
        }));
        layers.push(Layer::Silhouette(SilhouetteLayer { silhouette }));
        layers.push(Layer::Subtitles(Subtitles {
            current: subtitle,
            outgoing,
        }));
        layers.push(Layer::Progress(Progress { markers: progress }));
        layers.push(Layer::Vignette(Vignette));
        layers
    }

    fn resolve(layers: &[Layer], moment: &Moment) -> ResolvedScene {
        let mut scene = ResolvedScene {
            width: moment.contract.width,
            height: moment.contract.height,
            ..ResolvedScene::default()
        };
        for layer in layers {
            layer.resolve(moment, &mut scene);
        }
        scene
    }
}
