use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use raylib::prelude::*;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod render;
mod texture_loader;

use carousel::config::validate_dwell;
use carousel::constants::*;
use carousel::{Page, PageConfig, Variant};

use crate::render::{Assets, draw_page, nav_links};
use crate::texture_loader::load_all;

/// Render a landing page with an auto-advancing hero carousel.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Page description (TOML)
    page: PathBuf,

    /// Override the page's variant
    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// Seconds each slide stays on screen
    #[arg(long)]
    dwell: Option<f32>,

    #[arg(long, default_value_t = RENDER_WIDTH)]
    width: i32,

    #[arg(long, default_value_t = RENDER_HEIGHT)]
    height: i32,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "carousel=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // --- Load Page ---
    let mut config = PageConfig::load(&args.page)
        .with_context(|| format!("loading page {}", args.page.display()))?;
    if let Some(variant) = args.variant {
        config.variant = variant;
    }
    if let Some(dwell) = args.dwell {
        config.dwell = Some(validate_dwell(dwell)?);
    }
    let slides = config.slides().context("collecting slides")?;
    info!(page = %args.page.display(), slides = slides.len(), variant = ?config.variant, "page loaded");

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title(config.title.as_deref().unwrap_or("Carousel"))
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut page = Page::new(&config, slides, args.width as f32, args.height as f32);

    // --- Load Textures ---
    let assets = Assets {
        slides: load_all(
            &mut rl,
            &thread,
            page.carousel().slides().iter().map(|slide| slide.image.as_deref()),
        ),
        products: load_all(
            &mut rl,
            &thread,
            page.layout().products.iter().map(|slot| Some(slot.image.as_path())),
        ),
    };

    let mut framebuffer = rl
        .load_render_texture(&thread, args.width as u32, args.height as u32)
        .context("creating render texture")?;

    page.ready();

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        // --- Input ---
        let screen_width = rl.get_screen_width() as f32;
        let screen_height = rl.get_screen_height() as f32;
        let wheel = rl.get_mouse_wheel_move();
        if wheel != 0.0 {
            page.scroll_by(-wheel * SCROLL_STEP);
        }
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            let mouse = rl.get_mouse_position();
            let point = Vector2::new(
                mouse.x * args.width as f32 / screen_width,
                mouse.y * args.height as f32 / screen_height,
            );
            if let Some((_, id)) = nav_links(&page)
                .into_iter()
                .find(|(rect, _)| rect.check_collision_point_rec(point))
            {
                page.scroll_to_anchor(&id);
            }
        }

        // --- Update Logic ---
        page.update(dt);

        // --- Render into the fixed size framebuffer ---
        rl.draw_texture_mode(&thread, &mut framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(&thread);
            draw_page(&mut d, &page, &assets);
        });

        // Framebuffer textures are stored upside down
        let mut d = rl.begin_drawing(&thread);
        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;
        d.clear_background(Color::BLACK);
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }

    page.unload();
    Ok(())
}
