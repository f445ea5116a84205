//! Hero carousel controller.
//!
//! One slide is active at a time. Activating a slide restarts its Ken Burns
//! zoom, its staggered text entrance and its progress bar; a recurring timer
//! advances to the next slide (wrapping) every dwell period.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::animation::{AnimationPort, Element, Property, TextRole, TweenSpec};
use crate::constants::*;
use crate::ease::Easing;
use crate::state::CarouselState;

/// One entry of the carousel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slide {
    pub image: Option<PathBuf>,
    pub subtitle: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub action: Option<String>,
    active: bool,
}

impl Slide {
    pub fn new(image: impl Into<PathBuf>) -> Self {
        Self { image: Some(image.into()), ..Self::default() }
    }

    pub fn with_text(mut self, role: TextRole, text: impl Into<String>) -> Self {
        let text = Some(text.into());
        match role {
            TextRole::Subtitle => self.subtitle = text,
            TextRole::Title => self.title = text,
            TextRole::Description => self.description = text,
            TextRole::Action => self.action = text,
        }
        self
    }

    pub fn text(&self, role: TextRole) -> Option<&str> {
        match role {
            TextRole::Subtitle => self.subtitle.as_deref(),
            TextRole::Title => self.title.as_deref(),
            TextRole::Description => self.description.as_deref(),
            TextRole::Action => self.action.as_deref(),
        }
    }

    /// Text elements present on this slide, in entrance order.
    pub fn texts(&self) -> impl Iterator<Item = (TextRole, &str)> {
        TextRole::ALL
            .into_iter()
            .filter_map(|role| self.text(role).map(|text| (role, text)))
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageZoom {
    pub from_scale: f32,
    pub ease: Easing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextEntrance {
    pub offset_y: f32,
    pub duration: f32,
    pub stagger: f32,
    pub delay: f32,
    pub ease: Easing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    /// Seconds a slide stays active; also the image zoom and bar fill length.
    pub dwell: f32,
    pub image_zoom: Option<ImageZoom>,
    pub text_entrance: Option<TextEntrance>,
    /// Slide opacity crossfade duration, when slides fade rather than cut.
    pub crossfade: Option<f32>,
}

impl CarouselConfig {
    /// Ken Burns zoom and staggered text, slides cut on the active flag.
    pub fn hero() -> Self {
        Self {
            dwell: HERO_DWELL_DURATION,
            image_zoom: Some(ImageZoom { from_scale: IMAGE_START_SCALE, ease: Easing::Power1Out }),
            text_entrance: Some(TextEntrance {
                offset_y: TEXT_OFFSET_Y,
                duration: TEXT_DURATION,
                stagger: TEXT_STAGGER,
                delay: TEXT_DELAY,
                ease: Easing::Power3Out,
            }),
            crossfade: None,
        }
    }

    /// Plain slides crossfading on opacity.
    pub fn crossfade() -> Self {
        Self {
            dwell: CROSSFADE_DWELL_DURATION,
            image_zoom: None,
            text_entrance: None,
            crossfade: Some(CROSSFADE_DURATION),
        }
    }

    pub fn with_dwell(mut self, dwell: f32) -> Self {
        self.dwell = dwell;
        self
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::hero()
    }
}

/// Recurring timer driven by frame time.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    period: f32,
    elapsed: f32,
}

impl Interval {
    pub fn new(period: f32) -> Self {
        Self { period, elapsed: 0.0 }
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    /// Add `dt` seconds and return how many periods completed.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if self.period <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }
}

pub struct Carousel {
    slides: Vec<Slide>,
    config: CarouselConfig,
    current_index: usize,
    state: CarouselState,
    timer: Option<Interval>,
}

impl Carousel {
    pub fn new(slides: Vec<Slide>, config: CarouselConfig) -> Self {
        Self {
            slides,
            config,
            current_index: 0,
            state: CarouselState::Idle,
            timer: None,
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == CarouselState::Running
    }

    /// Show the first slide and arm the advance timer. Only an idle carousel
    /// starts; a stopped one stays stopped.
    pub fn start<P: AnimationPort + ?Sized>(&mut self, port: &mut P) {
        if self.state != CarouselState::Idle {
            return;
        }

        if self.config.crossfade.is_some() {
            for index in 0..self.slides.len() {
                port.set_immediate(Element::Slide(index), &[(Property::Opacity, 0.0)]);
            }
        }

        self.current_index = 0;
        self.activate(0, port);
        if !self.slides.is_empty() {
            self.timer = Some(Interval::new(self.config.dwell));
        }
        self.state = CarouselState::Running;
        info!(slides = self.slides.len(), dwell = self.config.dwell, "carousel started");
    }

    /// Drive the advance timer by one frame.
    pub fn update<P: AnimationPort + ?Sized>(&mut self, dt: f32, port: &mut P) {
        if self.state != CarouselState::Running {
            return;
        }
        let fired = match self.timer.as_mut() {
            Some(timer) => timer.tick(dt),
            None => 0,
        };
        for _ in 0..fired {
            self.advance(port);
        }
    }

    /// Cancel the timer and every animation in flight.
    pub fn stop<P: AnimationPort + ?Sized>(&mut self, port: &mut P) {
        if self.state == CarouselState::Stopped {
            return;
        }
        self.timer = None;
        self.state = CarouselState::Stopped;
        port.cancel_all();
        info!(index = self.current_index, "carousel stopped");
    }

    pub fn advance<P: AnimationPort + ?Sized>(&mut self, port: &mut P) {
        if self.slides.is_empty() {
            return;
        }
        let next = (self.current_index + 1) % self.slides.len();
        self.activate(next, port);
        self.current_index = next;
    }

    pub fn activate<P: AnimationPort + ?Sized>(&mut self, index: usize, port: &mut P) {
        if index >= self.slides.len() {
            return;
        }
        debug!(index, "activating slide");

        // Other slides must stop animating before anything new starts.
        for other in (0..self.slides.len()).filter(|&i| i != index) {
            port.cancel(&self.elements_of(other));
        }

        for (i, slide) in self.slides.iter_mut().enumerate() {
            slide.active = i == index;
        }

        for other in (0..self.slides.len()).filter(|&i| i != index) {
            port.set_immediate(Element::ProgressBar(other), &[(Property::Fill, 0.0)]);
        }

        if let Some(duration) = self.config.crossfade {
            let spec = TweenSpec::new(duration, Easing::Linear);
            let others: Vec<Element> = (0..self.slides.len())
                .filter(|&i| i != index)
                .map(Element::Slide)
                .collect();
            port.animate(&others, &[], &[(Property::Opacity, 0.0)], spec);
            port.animate(&[Element::Slide(index)], &[], &[(Property::Opacity, 1.0)], spec);
        }

        if let Some(zoom) = self.config.image_zoom {
            port.animate(
                &[Element::SlideImage(index)],
                &[(Property::Scale, zoom.from_scale)],
                &[(Property::Scale, 1.0)],
                TweenSpec::new(self.config.dwell, zoom.ease),
            );
        }

        if let Some(text) = self.config.text_entrance {
            let targets: Vec<Element> = self.slides[index]
                .texts()
                .map(|(role, _)| Element::SlideText(index, role))
                .collect();
            port.animate(
                &targets,
                &[(Property::OffsetY, text.offset_y), (Property::Opacity, 0.0)],
                &[(Property::OffsetY, 0.0), (Property::Opacity, 1.0)],
                TweenSpec::new(text.duration, text.ease)
                    .with_delay(text.delay)
                    .with_stagger(text.stagger),
            );
        }

        port.animate(
            &[Element::ProgressBar(index)],
            &[(Property::Fill, 0.0)],
            &[(Property::Fill, 100.0)],
            TweenSpec::new(self.config.dwell, Easing::Linear),
        );
    }

    /// Every element belonging to one slide.
    fn elements_of(&self, index: usize) -> Vec<Element> {
        let mut elements = vec![Element::Slide(index), Element::SlideImage(index)];
        elements.extend(
            self.slides[index]
                .texts()
                .map(|(role, _)| Element::SlideText(index, role)),
        );
        elements.push(Element::ProgressBar(index));
        elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Props, Timeline};
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Animate(Vec<Element>, TweenSpec),
        Cancel(Vec<Element>),
        Set(Element),
        CancelAll,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl AnimationPort for Recorder {
        fn animate(&mut self, targets: &[Element], _from: Props, _to: Props, spec: TweenSpec) {
            self.calls.push(Call::Animate(targets.to_vec(), spec));
        }

        fn cancel(&mut self, targets: &[Element]) {
            self.calls.push(Call::Cancel(targets.to_vec()));
        }

        fn set_immediate(&mut self, target: Element, _props: Props) {
            self.calls.push(Call::Set(target));
        }

        fn cancel_all(&mut self) {
            self.calls.push(Call::CancelAll);
        }
    }

    fn full_slide(name: &str) -> Slide {
        Slide::new(format!("{name}.jpg"))
            .with_text(TextRole::Subtitle, "New")
            .with_text(TextRole::Title, name)
            .with_text(TextRole::Description, "Lorem ipsum")
            .with_text(TextRole::Action, "Shop")
    }

    fn slides(n: usize) -> Vec<Slide> {
        (0..n).map(|i| full_slide(&format!("slide-{i}"))).collect()
    }

    fn active_count(carousel: &Carousel) -> usize {
        carousel.slides().iter().filter(|s| s.is_active()).count()
    }

    #[test]
    fn empty_carousel_does_nothing() {
        let mut carousel = Carousel::new(Vec::new(), CarouselConfig::hero());
        let mut port = Recorder::default();
        carousel.activate(0, &mut port);
        carousel.advance(&mut port);
        carousel.start(&mut port);
        carousel.update(100.0, &mut port);
        assert!(port.calls.is_empty());
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn out_of_range_activation_is_ignored() {
        let mut carousel = Carousel::new(slides(2), CarouselConfig::hero());
        let mut port = Recorder::default();
        carousel.activate(2, &mut port);
        assert!(port.calls.is_empty());
        assert_eq!(active_count(&carousel), 0);
    }

    #[test]
    fn other_slides_are_cancelled_before_anything_animates() {
        let mut carousel = Carousel::new(slides(3), CarouselConfig::hero());
        let mut port = Recorder::default();
        carousel.activate(1, &mut port);

        let first_animate = port
            .calls
            .iter()
            .position(|call| matches!(call, Call::Animate(..)))
            .unwrap();
        let cancelled: Vec<&Vec<Element>> = port.calls[..first_animate]
            .iter()
            .filter_map(|call| match call {
                Call::Cancel(targets) => Some(targets),
                _ => None,
            })
            .collect();

        assert_eq!(cancelled.len(), 2);
        assert!(cancelled[0].contains(&Element::SlideImage(0)));
        assert!(cancelled[0].contains(&Element::SlideText(0, TextRole::Action)));
        assert!(cancelled[1].contains(&Element::ProgressBar(2)));
        assert!(cancelled.iter().all(|targets| !targets.contains(&Element::SlideImage(1))));
        assert!(!port.calls[first_animate..].iter().any(|call| matches!(call, Call::Cancel(_))));
    }

    #[test]
    fn other_bars_reset_and_target_bar_fills_over_dwell() {
        let mut carousel = Carousel::new(slides(3), CarouselConfig::hero());
        let mut port = Recorder::default();
        carousel.activate(0, &mut port);

        assert!(port.calls.contains(&Call::Set(Element::ProgressBar(1))));
        assert!(port.calls.contains(&Call::Set(Element::ProgressBar(2))));
        assert!(!port.calls.contains(&Call::Set(Element::ProgressBar(0))));
        assert!(port.calls.contains(&Call::Animate(
            vec![Element::ProgressBar(0)],
            TweenSpec::new(HERO_DWELL_DURATION, Easing::Linear),
        )));
    }

    #[test]
    fn text_entrance_skips_missing_elements() {
        let slide = Slide::new("a.jpg")
            .with_text(TextRole::Title, "Title")
            .with_text(TextRole::Action, "Go");
        let mut carousel = Carousel::new(vec![slide], CarouselConfig::hero());
        let mut timeline = Timeline::new();
        carousel.activate(0, &mut timeline);

        let title = timeline.tween(Element::SlideText(0, TextRole::Title), Property::Opacity).unwrap();
        let action = timeline.tween(Element::SlideText(0, TextRole::Action), Property::Opacity).unwrap();
        assert!((title.delay() - 0.2).abs() < 1e-6);
        assert!((action.delay() - 0.3).abs() < 1e-6);
        assert!(timeline.tween(Element::SlideText(0, TextRole::Subtitle), Property::Opacity).is_none());
    }

    #[test]
    fn text_entrance_staggers_four_elements() {
        let mut carousel = Carousel::new(slides(1), CarouselConfig::hero());
        let mut timeline = Timeline::new();
        carousel.activate(0, &mut timeline);

        for (n, role) in TextRole::ALL.into_iter().enumerate() {
            let tween = timeline.tween(Element::SlideText(0, role), Property::OffsetY).unwrap();
            assert!((tween.delay() - (0.2 + 0.1 * n as f32)).abs() < 1e-6);
            assert_eq!(tween.start(), TEXT_OFFSET_Y);
            assert_eq!(tween.end(), 0.0);
            assert_eq!(tween.easing(), Easing::Power3Out);
        }
    }

    #[test]
    fn image_settles_from_zoomed_in() {
        let mut carousel = Carousel::new(slides(2), CarouselConfig::hero());
        let mut timeline = Timeline::new();
        carousel.activate(1, &mut timeline);
        assert_eq!(timeline.value(Element::SlideImage(1), Property::Scale), Some(IMAGE_START_SCALE));

        timeline.advance(HERO_DWELL_DURATION / 2.0);
        let halfway = timeline.value(Element::SlideImage(1), Property::Scale).unwrap();
        assert!(halfway < 1.075, "ease-out should be past the linear midpoint, got {halfway}");

        timeline.advance(HERO_DWELL_DURATION / 2.0);
        assert_eq!(timeline.value(Element::SlideImage(1), Property::Scale), Some(1.0));
    }

    #[test]
    fn repeated_activation_restarts_the_same_slide() {
        let mut carousel = Carousel::new(slides(2), CarouselConfig::hero());
        let mut timeline = Timeline::new();
        carousel.activate(0, &mut timeline);
        timeline.advance(3.0);
        carousel.activate(0, &mut timeline);

        assert_eq!(active_count(&carousel), 1);
        assert_eq!(timeline.value(Element::ProgressBar(0), Property::Fill), Some(0.0));
        timeline.advance(3.0);
        assert_eq!(timeline.value(Element::ProgressBar(0), Property::Fill), Some(50.0));
    }

    #[test]
    fn rapid_activation_leaves_no_stale_fill() {
        let mut carousel = Carousel::new(slides(3), CarouselConfig::hero());
        let mut timeline = Timeline::new();
        carousel.activate(0, &mut timeline);
        timeline.advance(0.5);
        carousel.activate(1, &mut timeline);
        timeline.advance(0.5);
        carousel.activate(2, &mut timeline);
        timeline.advance(1.5);

        assert_eq!(timeline.value(Element::ProgressBar(0), Property::Fill), Some(0.0));
        assert_eq!(timeline.value(Element::ProgressBar(1), Property::Fill), Some(0.0));
        assert_eq!(timeline.value(Element::ProgressBar(2), Property::Fill), Some(25.0));
        assert!(!timeline.is_animating(Element::SlideImage(0)));
        assert!(!timeline.is_animating(Element::SlideText(1, TextRole::Title)));
        assert_eq!(active_count(&carousel), 1);
    }

    #[test]
    fn three_slides_cycle_every_six_seconds() {
        let mut carousel = Carousel::new(slides(3), CarouselConfig::hero());
        let mut timeline = Timeline::new();
        carousel.start(&mut timeline);
        assert_eq!(carousel.current_index(), 0);
        assert!(carousel.slides()[0].is_active());

        let step = |carousel: &mut Carousel, timeline: &mut Timeline, seconds: f32| {
            for _ in 0..(seconds / 0.5) as usize {
                timeline.advance(0.5);
                carousel.update(0.5, timeline);
            }
        };

        step(&mut carousel, &mut timeline, 3.0);
        assert_eq!(timeline.value(Element::ProgressBar(0), Property::Fill), Some(50.0));

        step(&mut carousel, &mut timeline, 3.0);
        assert_eq!(carousel.current_index(), 1);
        assert!(carousel.slides()[1].is_active());
        assert_eq!(timeline.value(Element::ProgressBar(0), Property::Fill), Some(0.0));
        assert!(timeline.is_animating(Element::ProgressBar(1)));

        step(&mut carousel, &mut timeline, 12.0);
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(active_count(&carousel), 1);
    }

    #[test]
    fn long_frame_advances_once_per_elapsed_period() {
        let mut carousel = Carousel::new(slides(4), CarouselConfig::hero().with_dwell(1.0));
        let mut port = Recorder::default();
        carousel.start(&mut port);
        carousel.update(3.0, &mut port);
        assert_eq!(carousel.current_index(), 3);
    }

    #[test]
    fn stop_cancels_timer_and_animations() {
        let mut carousel = Carousel::new(slides(3), CarouselConfig::hero());
        let mut timeline = Timeline::new();
        carousel.start(&mut timeline);
        timeline.advance(2.0);
        carousel.update(2.0, &mut timeline);
        carousel.stop(&mut timeline);

        assert_eq!(carousel.state(), CarouselState::Stopped);
        assert_eq!(timeline.active_tweens(), 0);
        let frozen = timeline.value(Element::ProgressBar(0), Property::Fill);

        timeline.advance(30.0);
        carousel.update(30.0, &mut timeline);
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(timeline.value(Element::ProgressBar(0), Property::Fill), frozen);

        carousel.start(&mut timeline);
        assert_eq!(carousel.state(), CarouselState::Stopped);
    }

    #[test]
    fn start_only_once() {
        let mut carousel = Carousel::new(slides(2), CarouselConfig::hero());
        let mut port = Recorder::default();
        carousel.start(&mut port);
        let calls = port.calls.len();
        carousel.start(&mut port);
        assert_eq!(port.calls.len(), calls);
    }

    #[test]
    fn crossfade_swaps_slide_opacity() {
        let mut carousel = Carousel::new(slides(3), CarouselConfig::crossfade());
        let mut timeline = Timeline::new();
        carousel.start(&mut timeline);
        timeline.advance(CROSSFADE_DURATION);
        assert_eq!(timeline.value(Element::Slide(0), Property::Opacity), Some(1.0));
        assert_eq!(timeline.value(Element::Slide(1), Property::Opacity), Some(0.0));

        timeline.advance(CROSSFADE_DWELL_DURATION - CROSSFADE_DURATION);
        carousel.update(CROSSFADE_DWELL_DURATION, &mut timeline);
        assert_eq!(carousel.current_index(), 1);
        timeline.advance(CROSSFADE_DURATION / 2.0);
        assert_eq!(timeline.value(Element::Slide(0), Property::Opacity), Some(0.5));
        assert_eq!(timeline.value(Element::Slide(1), Property::Opacity), Some(0.5));
        timeline.advance(CROSSFADE_DURATION / 2.0);
        assert_eq!(timeline.value(Element::Slide(0), Property::Opacity), Some(0.0));
        assert_eq!(timeline.value(Element::Slide(1), Property::Opacity), Some(1.0));

        // No zoom or text in this preset.
        assert_eq!(timeline.value(Element::SlideImage(1), Property::Scale), None);
        assert_eq!(timeline.value(Element::SlideText(1, TextRole::Title), Property::Opacity), None);
    }

    #[test]
    fn interval_counts_whole_periods() {
        let mut interval = Interval::new(2.0);
        assert_eq!(interval.tick(1.5), 0);
        assert_eq!(interval.tick(0.5), 1);
        assert_eq!(interval.tick(4.5), 2);
        assert_eq!(interval.tick(1.5), 1);
    }

    proptest! {
        #[test]
        fn prop_advance_is_modular(n in 1usize..12, k in 0usize..60) {
            let mut carousel = Carousel::new(slides(n), CarouselConfig::hero());
            let mut port = Recorder::default();
            carousel.start(&mut port);
            for _ in 0..k {
                carousel.advance(&mut port);
            }
            prop_assert_eq!(carousel.current_index(), k % n);
            prop_assert_eq!(active_count(&carousel), 1);
            prop_assert!(carousel.slides()[k % n].is_active());
        }
    }
}
