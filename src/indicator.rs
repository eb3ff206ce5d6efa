//! RGB indicator effects and the sink driving them.
//!
//! States pick an effect on entry and silence it on exit; the pixel-level
//! animation (phase math, per-pixel colors) belongs to the renderer.

use crate::config::Rgb;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// The effect vocabulary the states select from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorEffect {
    Off,
    Solid(Rgb),
    /// Slow sine-like pulse. `period` is one full breath.
    Breath { color: Rgb, period: Duration },
    /// Bar filled at start, draining linearly over `total`.
    FillDecay { color: Rgb, total: Duration },
    /// Chasing dot, used while waiting on the network.
    Spinner(Rgb),
}

/// Narrow interface the states talk to.
pub trait IndicatorSink {
    fn set_effect(&mut self, effect: IndicatorEffect);

    fn off(&mut self) {
        self.set_effect(IndicatorEffect::Off);
    }
}

/// Indicator shared between the core (writer) and the renderer (reader).
#[derive(Clone)]
pub struct SharedIndicator {
    inner: Arc<Mutex<(IndicatorEffect, Instant)>>,
}

impl Default for SharedIndicator {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new((IndicatorEffect::Off, Instant::now()))),
        }
    }
}

impl SharedIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current effect and when it was set (for animation phase).
    pub fn snapshot(&self) -> (IndicatorEffect, Instant) {
        *self.inner.lock().expect("indicator lock poisoned")
    }
}

impl IndicatorSink for SharedIndicator {
    fn set_effect(&mut self, effect: IndicatorEffect) {
        *self.inner.lock().expect("indicator lock poisoned") = (effect, Instant::now());
    }
}

/// Test double recording every effect change in order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingIndicator {
    pub effects: Vec<IndicatorEffect>,
}

#[cfg(test)]
impl IndicatorSink for RecordingIndicator {
    fn set_effect(&mut self, effect: IndicatorEffect) {
        self.effects.push(effect);
    }
}

#[cfg(test)]
impl IndicatorSink for Arc<Mutex<RecordingIndicator>> {
    fn set_effect(&mut self, effect: IndicatorEffect) {
        self.lock()
            .expect("recording indicator lock poisoned")
            .set_effect(effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TEAL;

    #[test]
    fn test_shared_indicator_roundtrip() {
        let mut indicator = SharedIndicator::new();
        indicator.set_effect(IndicatorEffect::Solid(TEAL));
        assert_eq!(indicator.snapshot().0, IndicatorEffect::Solid(TEAL));

        indicator.off();
        assert_eq!(indicator.snapshot().0, IndicatorEffect::Off);
    }

    #[test]
    fn test_recording_indicator_keeps_order() {
        let mut indicator = RecordingIndicator::default();
        indicator.set_effect(IndicatorEffect::Solid(TEAL));
        indicator.off();
        assert_eq!(
            indicator.effects,
            vec![IndicatorEffect::Solid(TEAL), IndicatorEffect::Off]
        );
    }
}
