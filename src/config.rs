//! Page description loaded from TOML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::animation::TextRole;
use crate::carousel::{CarouselConfig, Slide};
use crate::error::{Error, Result};
use crate::header::HeaderConfig;
use crate::scroll::RevealConfig;

/// The two page flavours: Ken Burns hero with staggered text, or a plain
/// opacity crossfade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Hero,
    Crossfade,
}

impl Variant {
    pub fn carousel(self) -> CarouselConfig {
        match self {
            Variant::Hero => CarouselConfig::hero(),
            Variant::Crossfade => CarouselConfig::crossfade(),
        }
    }

    pub fn reveal(self) -> RevealConfig {
        match self {
            Variant::Hero => RevealConfig::hero(),
            Variant::Crossfade => RevealConfig::crossfade(),
        }
    }

    pub fn header(self) -> HeaderConfig {
        match self {
            Variant::Hero => HeaderConfig::hero(),
            Variant::Crossfade => HeaderConfig::crossfade(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlideConfig {
    pub image: Option<PathBuf>,
    pub subtitle: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub action: Option<String>,
}

impl SlideConfig {
    fn into_slide(self) -> Slide {
        let mut slide = Slide::default();
        slide.image = self.image;
        let texts = [
            (TextRole::Subtitle, self.subtitle),
            (TextRole::Title, self.title),
            (TextRole::Description, self.description),
            (TextRole::Action, self.action),
        ];
        for (role, text) in texts {
            if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
                slide = slide.with_text(role, text);
            }
        }
        slide
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub height: Option<f32>,
    /// Light background; the header turns dark over it.
    #[serde(default)]
    pub light: bool,
    #[serde(default = "default_true")]
    pub reveal: bool,
    /// Product images zoomed as they scroll through the viewport.
    #[serde(default)]
    pub images: Vec<PathBuf>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub variant: Variant,
    pub dwell: Option<f32>,
    pub slides_dir: Option<PathBuf>,
    #[serde(default)]
    pub slides: Vec<SlideConfig>,
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

impl PageConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::parse(&text, base).map_err(|e| match e {
            Error::Parse { source, .. } => Error::Parse { path: path.to_path_buf(), source },
            other => other,
        })
    }

    /// Parse a page description, resolving relative paths against `base`.
    pub fn parse(text: &str, base: &Path) -> Result<Self> {
        let mut config: PageConfig = toml::from_str(text).map_err(|source| Error::Parse {
            path: PathBuf::new(),
            source,
        })?;
        if let Some(dwell) = config.dwell {
            validate_dwell(dwell)?;
        }

        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        if let Some(dir) = config.slides_dir.as_mut() {
            resolve(dir);
        }
        for slide in config.slides.iter_mut() {
            if let Some(image) = slide.image.as_mut() {
                resolve(image);
            }
        }
        for section in config.sections.iter_mut() {
            section.images.iter_mut().for_each(resolve);
        }
        debug!(slides = config.slides.len(), sections = config.sections.len(), "page parsed");
        Ok(config)
    }

    /// Carousel settings for the chosen variant with any dwell override.
    pub fn carousel(&self) -> CarouselConfig {
        let preset = self.variant.carousel();
        match self.dwell {
            Some(dwell) => preset.with_dwell(dwell),
            None => preset,
        }
    }

    /// Explicit slides first, then one bare slide per image in `slides_dir`.
    pub fn slides(&self) -> Result<Vec<Slide>> {
        let mut slides: Vec<Slide> = self.slides.iter().cloned().map(SlideConfig::into_slide).collect();
        if let Some(dir) = &self.slides_dir {
            slides.extend(load_sorted_image_paths(dir)?.into_iter().map(Slide::new));
        }
        Ok(slides)
    }
}

pub fn validate_dwell(dwell: f32) -> Result<f32> {
    if dwell.is_finite() && dwell > 0.0 {
        Ok(dwell)
    } else {
        Err(Error::InvalidDwell(dwell))
    }
}

/// Image files of a directory, sorted by file name.
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let io_error = |source| Error::Io { path: dir_path.to_path_buf(), source };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
            match ext.to_lowercase().as_str() {
                "png" | "jpg" | "jpeg" | "bmp" | "gif" => paths.push(path),
                _ => {}
            }
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        Err(Error::NoImages(dir_path.to_path_buf()))
    } else {
        Ok(paths)
    }
}
