//! The landing page: hero carousel on top, content sections below, a header
//! over everything.

use tracing::{debug, info};

use crate::animation::{AnimationPort, Element, Property, Timeline, TweenSpec};
use crate::carousel::{Carousel, Slide};
use crate::config::{PageConfig, SectionConfig};
use crate::constants::*;
use crate::ease::Easing;
use crate::header::{HeaderConfig, HeaderState, HeaderStyle, Span, header_state};
use crate::scroll::{ScrollReveal, scrub_progress, scrub_scale};

const REVEAL_INSET: f32 = 64.0;     // Reveal block starts this far into its section
const PRODUCT_INSET: f32 = 200.0;   // Product row starts this far into its section
const PRODUCT_HEIGHT: f32 = 240.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SectionLayout {
    pub id: String,
    pub title: String,
    pub body: String,
    pub span: Span,
    pub light: bool,
    /// Index of the section's reveal element, if it reveals on scroll.
    pub reveal: Option<usize>,
    /// Indices of the section's product images.
    pub products: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductSlot {
    pub image: std::path::PathBuf,
    pub section: usize,
    /// Position within the section's row.
    pub column: usize,
    pub top: f32,
    pub height: f32,
}

/// Vertical positions of everything below the hero, in page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub hero_height: f32,
    pub sections: Vec<SectionLayout>,
    pub products: Vec<ProductSlot>,
    pub total_height: f32,
}

impl Layout {
    pub fn compute(sections: &[SectionConfig], hero_height: f32) -> Self {
        let mut top = hero_height;
        let mut laid_out = Vec::with_capacity(sections.len());
        let mut products = Vec::new();

        for (section_index, section) in sections.iter().enumerate() {
            let height = section.height.unwrap_or(SECTION_HEIGHT).max(0.0);
            let mut indices = Vec::new();
            for (column, image) in section.images.iter().enumerate() {
                indices.push(products.len());
                products.push(ProductSlot {
                    image: image.clone(),
                    section: section_index,
                    column,
                    top: top + PRODUCT_INSET,
                    height: PRODUCT_HEIGHT,
                });
            }
            laid_out.push(SectionLayout {
                id: section.id.clone(),
                title: section.title.clone(),
                body: section.body.clone(),
                span: Span { top, bottom: top + height },
                light: section.light,
                reveal: None,
                products: indices,
            });
            top += height;
        }

        Self { hero_height, sections: laid_out, products, total_height: top }
    }

    pub fn section(&self, id: &str) -> Option<&SectionLayout> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// Span of the first light section, which drives the dark header.
    pub fn light_section(&self) -> Option<Span> {
        self.sections.iter().find(|section| section.light).map(|section| section.span)
    }

    pub fn max_scroll(&self, viewport_height: f32) -> f32 {
        (self.total_height - viewport_height).max(0.0)
    }
}

pub struct Page {
    title: String,
    timeline: Timeline,
    carousel: Carousel,
    reveal: ScrollReveal,
    header: HeaderConfig,
    layout: Layout,
    viewport_width: f32,
    viewport_height: f32,
    scroll_y: f32,
    unloaded: bool,
}

impl Page {
    pub fn new(config: &PageConfig, slides: Vec<Slide>, viewport_width: f32, viewport_height: f32) -> Self {
        let mut timeline = Timeline::new();
        let mut layout = Layout::compute(&config.sections, viewport_height);
        let mut reveal = ScrollReveal::new(config.variant.reveal());

        for (section, settings) in layout.sections.iter_mut().zip(&config.sections) {
            if settings.reveal {
                section.reveal = Some(reveal.register(section.span.top + REVEAL_INSET, &mut timeline));
            }
        }

        Self {
            title: config.title.clone().unwrap_or_default(),
            timeline,
            carousel: Carousel::new(slides, config.carousel()),
            reveal,
            header: config.variant.header(),
            layout,
            viewport_width,
            viewport_height,
            scroll_y: 0.0,
            unloaded: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn reveal(&self) -> &ScrollReveal {
        &self.reveal
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn viewport(&self) -> (f32, f32) {
        (self.viewport_width, self.viewport_height)
    }

    pub fn is_unloaded(&self) -> bool {
        self.unloaded
    }

    /// Page-ready hook: starts the carousel and evaluates scroll effects.
    pub fn ready(&mut self) {
        if self.unloaded {
            return;
        }
        self.carousel.start(&mut self.timeline);
        self.refresh_scroll();
        info!(sections = self.layout.sections.len(), "page ready");
    }

    /// Advance the page by one frame.
    pub fn update(&mut self, dt: f32) {
        if self.unloaded {
            return;
        }
        self.timeline.advance(dt);
        self.carousel.update(dt, &mut self.timeline);
        if let Some(y) = self.timeline.value(Element::Viewport, Property::ScrollY) {
            self.scroll_y = y;
        }
        self.refresh_scroll();
    }

    /// User scroll by `delta` pixels. Interrupts any smooth scroll.
    pub fn scroll_by(&mut self, delta: f32) {
        if self.unloaded {
            return;
        }
        let max = self.layout.max_scroll(self.viewport_height);
        let target = (self.scroll_y + delta).clamp(0.0, max);
        self.timeline.set_immediate(Element::Viewport, &[(Property::ScrollY, target)]);
        self.scroll_y = target;
        self.refresh_scroll();
    }

    /// Smooth-scroll so the section with `id` starts at the viewport top.
    /// Returns false, doing nothing, when no such section exists.
    pub fn scroll_to_anchor(&mut self, id: &str) -> bool {
        if self.unloaded {
            return false;
        }
        let Some(section) = self.layout.section(id) else {
            debug!(id, "no section for anchor");
            return false;
        };
        let target = section.span.top.min(self.layout.max_scroll(self.viewport_height));
        self.timeline.animate(
            &[Element::Viewport],
            &[(Property::ScrollY, self.scroll_y)],
            &[(Property::ScrollY, target)],
            TweenSpec::new(SMOOTH_SCROLL_DURATION, Easing::Power2InOut),
        );
        true
    }

    pub fn header(&self) -> HeaderState {
        header_state(self.scroll_y, &self.header, self.layout.light_section())
    }

    pub fn header_style(&self) -> HeaderStyle {
        self.header().style(&self.header)
    }

    /// Teardown: no timer fires and nothing animates afterwards.
    pub fn unload(&mut self) {
        if self.unloaded {
            return;
        }
        self.carousel.stop(&mut self.timeline);
        self.timeline.cancel_all();
        self.unloaded = true;
        info!("page unloaded");
    }

    fn refresh_scroll(&mut self) {
        self.reveal.update(self.scroll_y, self.viewport_height, &mut self.timeline);
        for (index, product) in self.layout.products.iter().enumerate() {
            let progress = scrub_progress(product.top - self.scroll_y, product.height, self.viewport_height);
            self.timeline
                .set_immediate(Element::ProductImage(index), &[(Property::Scale, scrub_scale(progress))]);
        }
    }
}
