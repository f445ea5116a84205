use std::fs;
use std::io::Cursor;
use std::path::Path;

use carousel::{Error, Result};
use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use tracing::{debug, warn};

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let image_error = |reason: String| Error::Image { path: image_path.to_path_buf(), reason };

    let file_bytes = fs::read(image_path).map_err(|source| Error::Io {
        path: image_path.to_path_buf(),
        source,
    })?;

    let extension = image_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    // EXIF is only read reliably from JPEG
    let mut orientation = 1;
    if extension == "jpg" || extension == "jpeg" {
        match Reader::new().read_from_container(&mut Cursor::new(&file_bytes)) {
            Ok(exif) => {
                if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                    if let Value::Short(values) = &field.value {
                        if let Some(&value) = values.first() {
                            orientation = value;
                        }
                    }
                }
            }
            Err(e) => {
                warn!(path = %image_path.display(), "no usable EXIF data: {e}");
            }
        }
    }

    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &file_bytes)
        .map_err(|e| image_error(e.to_string()))?;

    // 3 = 180 deg, 6 = 90 deg CW, 8 = 90 deg CCW. Flipped orientations are ignored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if orientation != 1 {
        debug!(path = %image_path.display(), orientation, "applied EXIF rotation");
    }

    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| image_error(e.to_string()))?;

    Ok(texture)
}

/// Load every path, keeping a `None` hole for images that fail so indices
/// keep matching slides and product slots.
pub fn load_all<'a>(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    paths: impl IntoIterator<Item = Option<&'a Path>>,
) -> Vec<Option<Texture2D>> {
    paths
        .into_iter()
        .map(|path| {
            let path = path?;
            match load_texture_with_exif_rotation(rl, thread, path) {
                Ok(texture) => Some(texture),
                Err(e) => {
                    warn!("{e}; drawing a placeholder instead");
                    None
                }
            }
        })
        .collect()
}
