//! Scroll-triggered effects.
//!
//! A [`Trigger`] splits an element's journey through the viewport into zones;
//! moving between zones yields [`Crossing`]s, and [`ToggleActions`] maps each
//! crossing onto what the reveal animation should do. Everything here is a
//! function of positions, so it runs the same for real scroll events and
//! for tests.

use tracing::debug;

use crate::animation::{AnimationPort, Element, Property, TweenSpec};
use crate::constants::*;
use crate::ease::Easing;

/// Where an element's top edge sits relative to a trigger's lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Below the start line: not reached yet.
    Before,
    Active,
    /// Above the end line.
    After,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

/// Start and end lines as fractions of viewport height, measured from the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trigger {
    pub start: f32,
    pub end: Option<f32>,
}

impl Trigger {
    /// Zone of an element whose top edge is `top` pixels below the viewport top.
    pub fn zone(&self, top: f32, viewport_height: f32) -> Zone {
        if top > self.start * viewport_height {
            Zone::Before
        } else if self.end.is_some_and(|end| top < end * viewport_height) {
            Zone::After
        } else {
            Zone::Active
        }
    }
}

/// Crossings fired when moving from one zone to another, in the order they
/// happen. Skipping the active region entirely yields two crossings.
pub fn crossings(from: Zone, to: Zone) -> Vec<Crossing> {
    use Zone::*;
    match (from, to) {
        (Before, Active) => vec![Crossing::Enter],
        (Before, After) => vec![Crossing::Enter, Crossing::Leave],
        (Active, After) => vec![Crossing::Leave],
        (After, Active) => vec![Crossing::EnterBack],
        (After, Before) => vec![Crossing::EnterBack, Crossing::LeaveBack],
        (Active, Before) => vec![Crossing::LeaveBack],
        _ => Vec::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Play,
    Reverse,
    Restart,
    Reset,
    None,
}

/// What to do on enter, leave, enter-back and leave-back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl ToggleActions {
    /// Play once, never undo.
    pub const ONCE: ToggleActions = ToggleActions {
        on_enter: ToggleAction::Play,
        on_leave: ToggleAction::None,
        on_enter_back: ToggleAction::None,
        on_leave_back: ToggleAction::None,
    };

    /// Play going down, reverse when scrolled back above the start line.
    pub const REVERSIBLE: ToggleActions = ToggleActions {
        on_enter: ToggleAction::Play,
        on_leave: ToggleAction::None,
        on_enter_back: ToggleAction::None,
        on_leave_back: ToggleAction::Reverse,
    };

    pub fn action(&self, crossing: Crossing) -> ToggleAction {
        match crossing {
            Crossing::Enter => self.on_enter,
            Crossing::Leave => self.on_leave,
            Crossing::EnterBack => self.on_enter_back,
            Crossing::LeaveBack => self.on_leave_back,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealConfig {
    pub trigger: Trigger,
    pub actions: ToggleActions,
    /// How far below its resting place a hidden element sits.
    pub offset_y: f32,
    pub duration: f32,
    pub ease: Easing,
}

impl RevealConfig {
    pub fn hero() -> Self {
        Self {
            trigger: Trigger { start: REVEAL_START, end: Some(REVEAL_END) },
            actions: ToggleActions::REVERSIBLE,
            offset_y: HERO_REVEAL_OFFSET_Y,
            duration: HERO_REVEAL_DURATION,
            ease: Easing::Power3Out,
        }
    }

    pub fn crossfade() -> Self {
        Self {
            trigger: Trigger { start: REVEAL_START, end: None },
            actions: ToggleActions::ONCE,
            offset_y: CROSSFADE_REVEAL_OFFSET_Y,
            duration: CROSSFADE_REVEAL_DURATION,
            ease: Easing::Power4Out,
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::hero()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct RevealItem {
    /// Top edge in page coordinates.
    top: f32,
    zone: Zone,
    revealed: bool,
}

/// Reveal-on-scroll elements of a page.
#[derive(Debug, Clone)]
pub struct ScrollReveal {
    config: RevealConfig,
    items: Vec<RevealItem>,
}

impl ScrollReveal {
    pub fn new(config: RevealConfig) -> Self {
        Self { config, items: Vec::new() }
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(|item| item.revealed)
    }

    /// Register an element at page offset `top` and put it in its hidden
    /// state. Returns its index, used with [`Element::Reveal`].
    pub fn register<P: AnimationPort + ?Sized>(&mut self, top: f32, port: &mut P) -> usize {
        let index = self.items.len();
        self.items.push(RevealItem { top, zone: Zone::Before, revealed: false });
        port.set_immediate(Element::Reveal(index), &self.hidden());
        index
    }

    /// Evaluate every element against the current scroll position. Actions
    /// only fire when an element changes zone.
    pub fn update<P: AnimationPort + ?Sized>(&mut self, scroll_y: f32, viewport_height: f32, port: &mut P) {
        for index in 0..self.items.len() {
            let top = self.items[index].top - scroll_y;
            let zone = self.config.trigger.zone(top, viewport_height);
            let previous = self.items[index].zone;
            if zone == previous {
                continue;
            }
            self.items[index].zone = zone;
            for crossing in crossings(previous, zone) {
                let action = self.config.actions.action(crossing);
                debug!(index, ?crossing, ?action, "reveal crossing");
                self.apply(index, action, port);
            }
        }
    }

    fn apply<P: AnimationPort + ?Sized>(&mut self, index: usize, action: ToggleAction, port: &mut P) {
        let element = Element::Reveal(index);
        let spec = TweenSpec::new(self.config.duration, self.config.ease);
        let item = &mut self.items[index];
        match action {
            ToggleAction::Play => {
                if !item.revealed {
                    item.revealed = true;
                    port.animate(&[element], &[], &Self::shown(), spec);
                }
            }
            ToggleAction::Reverse => {
                if item.revealed {
                    item.revealed = false;
                    port.animate(&[element], &[], &self.hidden(), spec);
                }
            }
            ToggleAction::Restart => {
                item.revealed = true;
                port.animate(&[element], &self.hidden(), &Self::shown(), spec);
            }
            ToggleAction::Reset => {
                item.revealed = false;
                port.set_immediate(element, &self.hidden());
            }
            ToggleAction::None => {}
        }
    }

    fn hidden(&self) -> [(Property, f32); 2] {
        [(Property::OffsetY, self.config.offset_y), (Property::Opacity, 0.0)]
    }

    fn shown() -> [(Property, f32); 2] {
        [(Property::OffsetY, 0.0), (Property::Opacity, 1.0)]
    }
}

/// Progress of a box through the viewport, from its top touching the
/// viewport bottom (0) to its bottom leaving the viewport top (1).
pub fn scrub_progress(top: f32, height: f32, viewport_height: f32) -> f32 {
    let distance = viewport_height + height;
    if distance <= 0.0 {
        return 0.0;
    }
    ((viewport_height - top) / distance).clamp(0.0, 1.0)
}

/// Scale of a scrubbed product image at a given progress.
pub fn scrub_scale(progress: f32) -> f32 {
    1.0 + (SCRUB_MAX_SCALE - 1.0) * Easing::Linear.apply(progress)
}
