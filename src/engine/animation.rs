//! Keyframe tracks sampled against scene-elapsed time.
//!
//! A track holds its first keyframe until its delay has passed and its last
//! keyframe once it has finished, like a `forwards` fill.

/// Flash pulse length for both scar regions.
pub const FLASH_MS: f32 = 300.0;
/// The second scar region starts its pulse this much later.
pub const FLASH_STAGGER_MS: f32 = 100.0;
pub const DISSOLVE_MS: f32 = 3000.0;
/// Blur radius the silhouette reaches at the end of a dissolve.
pub const DISSOLVE_BLUR_PX: f32 = 20.0;
/// Subtitle entry and exit duration.
pub const SUBTITLE_FADE_MS: f32 = 1000.0;
/// Vertical offset of an entering or exiting subtitle.
pub const SUBTITLE_SHIFT_PX: f32 = 20.0;
pub const ERASE_MS: f32 = 1500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Evenly spaced keyframes over `duration_ms`, starting after `delay_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track<'a> {
    keyframes: &'a [f32],
    duration_ms: f32,
    delay_ms: f32,
    easing: Easing,
}

impl<'a> Track<'a> {
    pub const fn new(keyframes: &'a [f32], duration_ms: f32) -> Self {
        Track {
            keyframes,
            duration_ms,
            delay_ms: 0.0,
            easing: Easing::EaseInOut,
        }
    }

    pub const fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub const fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn sample(&self, elapsed_ms: f32) -> f32 {
        let (first, last) = match self.keyframes {
            [] => return 0.0,
            [only] => return *only,
            [first, .., last] => (*first, *last),
        };
        let local = elapsed_ms - self.delay_ms;
        if local <= 0.0 {
            return first;
        }
        if local >= self.duration_ms {
            return last;
        }

        let segments = (self.keyframes.len() - 1) as f32;
        let position = local / self.duration_ms * segments;
        let index = (position.floor() as usize).min(self.keyframes.len() - 2);
        let t = self.easing.apply(position - index as f32);
        let a = self.keyframes[index];
        let b = self.keyframes[index + 1];
        a + (b - a) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn holds_first_keyframe_during_delay() {
        let track = Track::new(&[0.0, 0.8, 0.0], FLASH_MS).delay(FLASH_STAGGER_MS);
        assert_eq!(track.sample(0.0), 0.0);
        assert_eq!(track.sample(99.0), 0.0);
    }

    #[test]
    fn peaks_at_midpoint() {
        let track = Track::new(&[0.0, 1.0, 0.0], FLASH_MS);
        assert!(close(track.sample(150.0), 1.0));
        assert!(track.sample(75.0) > 0.0 && track.sample(75.0) < 1.0);
    }

    #[test]
    fn holds_last_keyframe_after_end() {
        let track = Track::new(&[6.4, DISSOLVE_BLUR_PX], DISSOLVE_MS);
        assert_eq!(track.sample(DISSOLVE_MS), DISSOLVE_BLUR_PX);
        assert_eq!(track.sample(60_000.0), DISSOLVE_BLUR_PX);
    }

    #[test]
    fn linear_is_proportional() {
        let track = Track::new(&[0.0, 10.0], 100.0).easing(Easing::Linear);
        assert!(close(track.sample(25.0), 2.5));
    }

    #[test]
    fn easings_fix_endpoints() {
        for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!(close(easing.apply(1.0), 1.0));
        }
    }
}
