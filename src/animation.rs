//! Animation port and the frame-stepped timeline that implements it.
//!
//! The carousel and the scroll effects never touch rendered state directly:
//! they describe tweens through [`AnimationPort`] and read the animated values
//! back from a [`Timeline`] when drawing.

use std::collections::HashMap;

use tracing::trace;

use crate::ease::{Easing, Tween};

/// Text elements a slide may carry, in entrance order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextRole {
    Subtitle,
    Title,
    Description,
    Action,
}

impl TextRole {
    pub const ALL: [TextRole; 4] = [
        TextRole::Subtitle,
        TextRole::Title,
        TextRole::Description,
        TextRole::Action,
    ];
}

/// Anything on the page that can be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Slide(usize),
    SlideImage(usize),
    SlideText(usize, TextRole),
    ProgressBar(usize),
    Reveal(usize),
    ProductImage(usize),
    Viewport,
}

/// Animatable visual properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Scale,
    OffsetY,
    Opacity,
    /// Progress bar fill, in percent.
    Fill,
    ScrollY,
}

pub type Props<'a> = &'a [(Property, f32)];

/// Timing of an `animate` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    pub duration: f32,
    pub ease: Easing,
    pub delay: f32,
    /// Extra delay added per target, in target order.
    pub stagger: f32,
}

impl TweenSpec {
    pub fn new(duration: f32, ease: Easing) -> Self {
        Self { duration, ease, delay: 0.0, stagger: 0.0 }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_stagger(mut self, stagger: f32) -> Self {
        self.stagger = stagger;
        self
    }

    /// Start offset of the `index`-th target.
    pub fn start_of(&self, index: usize) -> f32 {
        self.delay + self.stagger * index as f32
    }
}

/// The animation primitives the page logic is written against.
pub trait AnimationPort {
    /// Tween every property in `to` on each target. Properties present in
    /// `from` are set immediately; the others start at their current value.
    fn animate(&mut self, targets: &[Element], from: Props, to: Props, spec: TweenSpec);

    /// Stop every tween on the targets. Values stay where they are.
    fn cancel(&mut self, targets: &[Element]);

    /// Set values without animating, stopping tweens on those properties.
    fn set_immediate(&mut self, target: Element, props: Props);

    fn cancel_all(&mut self);
}

#[derive(Debug, Clone)]
struct Track {
    target: Element,
    property: Property,
    tween: Tween,
}

/// In-process animation engine stepped by the frame loop.
#[derive(Debug, Default)]
pub struct Timeline {
    values: HashMap<(Element, Property), f32>,
    tracks: Vec<Track>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a property, if anything ever set it.
    pub fn value(&self, target: Element, property: Property) -> Option<f32> {
        self.values.get(&(target, property)).copied()
    }

    pub fn value_or(&self, target: Element, property: Property, default: f32) -> f32 {
        self.value(target, property).unwrap_or(default)
    }

    /// Tween currently driving a property, if any.
    pub fn tween(&self, target: Element, property: Property) -> Option<&Tween> {
        self.tracks
            .iter()
            .find(|track| track.target == target && track.property == property)
            .map(|track| &track.tween)
    }

    pub fn is_animating(&self, target: Element) -> bool {
        self.tracks.iter().any(|track| track.target == target)
    }

    pub fn active_tweens(&self) -> usize {
        self.tracks.len()
    }

    /// Step every running tween by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        for track in self.tracks.iter_mut() {
            let before = track.tween.has_started();
            let value = track.tween.apply(dt);
            // Delayed tweens already rendered their start value.
            if before || track.tween.has_started() {
                self.values.insert((track.target, track.property), value);
            }
        }
        self.tracks.retain(|track| !track.tween.is_finished());
    }

    fn kill(&mut self, target: Element, property: Property) {
        self.tracks
            .retain(|track| !(track.target == target && track.property == property));
    }
}

impl AnimationPort for Timeline {
    fn animate(&mut self, targets: &[Element], from: Props, to: Props, spec: TweenSpec) {
        for (index, &target) in targets.iter().enumerate() {
            let delay = spec.start_of(index);
            for &(property, end) in to {
                let start = from
                    .iter()
                    .find(|(p, _)| *p == property)
                    .map(|&(_, v)| v)
                    .or_else(|| self.value(target, property))
                    .unwrap_or(end);

                self.kill(target, property);
                self.values.insert((target, property), start);

                let tween = Tween::new(spec.ease, start, end, spec.duration).with_delay(delay);
                if tween.is_finished() {
                    self.values.insert((target, property), end);
                    continue;
                }
                trace!(?target, ?property, start, end, delay, "tween");
                self.tracks.push(Track { target, property, tween });
            }
        }
    }

    fn cancel(&mut self, targets: &[Element]) {
        self.tracks.retain(|track| !targets.contains(&track.target));
    }

    fn set_immediate(&mut self, target: Element, props: Props) {
        for &(property, value) in props {
            self.kill(target, property);
            self.values.insert((target, property), value);
        }
    }

    fn cancel_all(&mut self) {
        self.tracks.clear();
    }
}
