//! A landing page with an auto-advancing hero carousel, reveal-on-scroll
//! sections and a scroll-keyed header.
//!
//! All state and timing lives here and runs headless; the `carousel` binary
//! (feature `window`) only draws what a [`page::Page`] reports.

pub mod animation;
pub mod carousel;
pub mod config;
pub mod constants;
pub mod ease;
pub mod error;
pub mod header;
pub mod page;
pub mod scroll;
pub mod state;

pub use animation::{AnimationPort, Element, Property, TextRole, Timeline, TweenSpec};
pub use carousel::{Carousel, CarouselConfig, Slide};
pub use config::{PageConfig, Variant};
pub use error::{Error, Result};
pub use page::Page;
pub use state::CarouselState;
