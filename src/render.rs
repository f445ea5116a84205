use carousel::page::Page;
use carousel::{Element, Property, TextRole};
use raylib::prelude::*;

const MARGIN: f32 = 80.0;
const BAR_HEIGHT: f32 = 3.0;
const BAR_GAP: f32 = 12.0;
const NAV_SLOT: f32 = 140.0;
const PRODUCT_GAP: f32 = 24.0;

/// Textures by slide index and by product slot index.
pub struct Assets {
    pub slides: Vec<Option<Texture2D>>,
    pub products: Vec<Option<Texture2D>>,
}

/// Header navigation links: hit box and the section they scroll to.
pub fn nav_links(page: &Page) -> Vec<(Rectangle, String)> {
    let (width, _) = page.viewport();
    let style = page.header_style();
    let sections = &page.layout().sections;
    let start = width - MARGIN - NAV_SLOT * sections.len() as f32;
    sections
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let rect = Rectangle::new(start + NAV_SLOT * i as f32, style.padding, NAV_SLOT, 24.0);
            (rect, section.id.clone())
        })
        .collect()
}

pub fn draw_page(d: &mut RaylibDrawHandle, page: &Page, assets: &Assets) {
    d.clear_background(Color::BLACK);
    draw_hero(d, page, assets);
    draw_sections(d, page, assets);
    draw_header(d, page);
}

fn draw_hero(d: &mut RaylibDrawHandle, page: &Page, assets: &Assets) {
    let (width, _) = page.viewport();
    let height = page.layout().hero_height;
    let top = -page.scroll_y();
    if top + height <= 0.0 {
        return;
    }

    let timeline = page.timeline();
    let carousel = page.carousel();
    let crossfade = carousel.config().crossfade.is_some();
    let hero = Rectangle::new(0.0, top, width, height);

    for (i, slide) in carousel.slides().iter().enumerate() {
        // Cut slides only show while active; crossfading ones while visible.
        let opacity = if crossfade {
            timeline.value_or(Element::Slide(i), Property::Opacity, 0.0)
        } else if slide.is_active() {
            1.0
        } else {
            0.0
        };
        if opacity <= 0.0 {
            continue;
        }

        let scale = timeline.value_or(Element::SlideImage(i), Property::Scale, 1.0);
        match assets.slides.get(i).and_then(Option::as_ref) {
            Some(texture) => draw_cover(d, texture, hero, scale, opacity),
            None => d.draw_rectangle_rec(hero, Color::DARKGRAY.fade(opacity)),
        }
        d.draw_rectangle_rec(hero, Color::BLACK.fade(0.35 * opacity));

        let mut y = top + height * 0.4;
        for (role, text) in slide.texts() {
            let element = Element::SlideText(i, role);
            let offset = timeline.value_or(element, Property::OffsetY, 0.0);
            let alpha = timeline.value_or(element, Property::Opacity, 1.0) * opacity;
            let size = match role {
                TextRole::Title => 64,
                TextRole::Subtitle => 20,
                _ => 24,
            };
            if role == TextRole::Action {
                let button = Rectangle::new(MARGIN, y + offset, 200.0, 48.0);
                d.draw_rectangle_rec(button, Color::WHITE.fade(alpha));
                d.draw_text(text, (MARGIN + 20.0) as i32, (y + offset + 14.0) as i32, 20, Color::BLACK.fade(alpha));
            } else {
                d.draw_text(text, MARGIN as i32, (y + offset) as i32, size, Color::WHITE.fade(alpha));
            }
            y += size as f32 + 24.0;
        }
    }

    let count = carousel.slides().len();
    if count > 0 {
        let bar_width = (width - 2.0 * MARGIN - BAR_GAP * (count - 1) as f32) / count as f32;
        let bar_y = top + height - MARGIN * 0.5;
        for i in 0..count {
            let x = MARGIN + i as f32 * (bar_width + BAR_GAP);
            let fill = timeline.value_or(Element::ProgressBar(i), Property::Fill, 0.0) / 100.0;
            d.draw_rectangle_rec(Rectangle::new(x, bar_y, bar_width, BAR_HEIGHT), Color::WHITE.fade(0.25));
            d.draw_rectangle_rec(Rectangle::new(x, bar_y, bar_width * fill, BAR_HEIGHT), Color::WHITE);
        }
    }
}

fn draw_sections(d: &mut RaylibDrawHandle, page: &Page, assets: &Assets) {
    let (width, viewport_height) = page.viewport();
    let timeline = page.timeline();
    let scroll = page.scroll_y();

    for section in page.layout().sections.iter() {
        let top = section.span.top - scroll;
        let bottom = section.span.bottom - scroll;
        if bottom <= 0.0 || top >= viewport_height {
            continue;
        }

        let (background, ink) = if section.light {
            (Color::RAYWHITE, Color::BLACK)
        } else {
            (Color::new(12, 12, 12, 255), Color::WHITE)
        };
        d.draw_rectangle_rec(Rectangle::new(0.0, top, width, bottom - top), background);

        let (offset, alpha) = match section.reveal {
            Some(index) => (
                timeline.value_or(Element::Reveal(index), Property::OffsetY, 0.0),
                timeline.value_or(Element::Reveal(index), Property::Opacity, 1.0),
            ),
            None => (0.0, 1.0),
        };
        let y = top + 64.0 + offset;
        d.draw_text(&section.title, MARGIN as i32, y as i32, 40, ink.fade(alpha));
        d.draw_text(&section.body, MARGIN as i32, (y + 60.0) as i32, 20, ink.fade(alpha * 0.8));

        for &index in section.products.iter() {
            let slot = &page.layout().products[index];
            let frame = Rectangle::new(
                MARGIN + slot.column as f32 * (slot.height + PRODUCT_GAP),
                slot.top - scroll,
                slot.height,
                slot.height,
            );
            let scale = timeline.value_or(Element::ProductImage(index), Property::Scale, 1.0);
            match assets.products.get(index).and_then(Option::as_ref) {
                Some(texture) => draw_cover(d, texture, frame, scale, 1.0),
                None => d.draw_rectangle_rec(frame, Color::GRAY),
            }
        }
    }
}

fn draw_header(d: &mut RaylibDrawHandle, page: &Page) {
    let (width, _) = page.viewport();
    let style = page.header_style();
    let height = style.padding * 2.0 + 24.0;
    let ink = if style.dark_text { Color::BLACK } else { Color::WHITE };

    if style.backdrop > 0.0 {
        let backdrop = if style.dark_text { Color::WHITE } else { Color::BLACK };
        d.draw_rectangle_rec(Rectangle::new(0.0, 0.0, width, height), backdrop.fade(style.backdrop));
    }
    if style.blur {
        d.draw_rectangle_rec(Rectangle::new(0.0, height - 1.0, width, 1.0), ink.fade(0.15));
    }

    d.draw_text(page.title(), MARGIN as i32, style.padding as i32, 24, ink);
    for (rect, id) in nav_links(page) {
        d.draw_text(&id, rect.x as i32, rect.y as i32, 18, ink);
    }
}

/// Draw `texture` cropped to fill `dest`, zoomed by `scale` around its center.
fn draw_cover(d: &mut RaylibDrawHandle, texture: &Texture2D, dest: Rectangle, scale: f32, alpha: f32) {
    let tex_width = texture.width() as f32;
    let tex_height = texture.height() as f32;
    if tex_width <= 0.0 || tex_height <= 0.0 || dest.width <= 0.0 || dest.height <= 0.0 {
        return;
    }

    let dest_ratio = dest.width / dest.height;
    let (mut src_width, mut src_height) = if tex_width / tex_height > dest_ratio {
        (tex_height * dest_ratio, tex_height)
    } else {
        (tex_width, tex_width / dest_ratio)
    };

    // Zooming in shows a smaller part of the texture
    let scale = scale.max(f32::EPSILON);
    src_width /= scale;
    src_height /= scale;

    let source = Rectangle::new(
        (tex_width - src_width) * 0.5,
        (tex_height - src_height) * 0.5,
        src_width,
        src_height,
    );

    d.draw_texture_pro(texture, source, dest, Vector2::new(0.0, 0.0), 0.0, Color::WHITE.fade(alpha));
}
