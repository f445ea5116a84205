//! Header style keyed on scroll position.

use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderConfig {
    /// Scroll offset past which the header condenses.
    pub threshold: f32,
    pub condensed_padding: f32,
    pub expanded_padding: f32,
    /// Backdrop opacity once condensed.
    pub backdrop: f32,
}

impl HeaderConfig {
    pub fn hero() -> Self {
        Self { threshold: HERO_HEADER_THRESHOLD, condensed_padding: 12.0, expanded_padding: 24.0, backdrop: 0.6 }
    }

    pub fn crossfade() -> Self {
        Self { threshold: CROSSFADE_HEADER_THRESHOLD, condensed_padding: 16.0, expanded_padding: 24.0, backdrop: 0.8 }
    }
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self::hero()
    }
}

/// Vertical extent of a section in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub top: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderState {
    pub condensed: bool,
    /// A light section is under the header, so the header switches to dark text.
    pub dark: bool,
}

/// Header state for a scroll offset. `light_section` is the section that
/// turns the header dark while it passes under the header line.
pub fn header_state(scroll_y: f32, config: &HeaderConfig, light_section: Option<Span>) -> HeaderState {
    HeaderState {
        condensed: scroll_y > config.threshold,
        dark: light_section.is_some_and(|span| under_header_line(scroll_y, span)),
    }
}

fn under_header_line(scroll_y: f32, span: Span) -> bool {
    span.top - scroll_y <= HEADER_LINE && span.bottom - scroll_y > HEADER_LINE
}

/// Resolved look of the header bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderStyle {
    pub padding: f32,
    pub backdrop: f32,
    pub blur: bool,
    pub dark_text: bool,
}

impl HeaderState {
    pub fn style(&self, config: &HeaderConfig) -> HeaderStyle {
        if self.condensed {
            HeaderStyle {
                padding: config.condensed_padding,
                backdrop: config.backdrop,
                blur: true,
                dark_text: self.dark,
            }
        } else {
            HeaderStyle {
                padding: config.expanded_padding,
                backdrop: 0.0,
                blur: false,
                dark_text: self.dark,
            }
        }
    }
}
