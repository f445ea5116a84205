use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid page file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("dwell duration must be a positive number of seconds, got {0}")]
    InvalidDwell(f32),

    #[error("no image files found in directory: {0}")]
    NoImages(PathBuf),

    #[error("failed to load image {path}: {reason}")]
    Image { path: PathBuf, reason: String },
}
