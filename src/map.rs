use std::io;
use std::path::{Path, PathBuf};

use image::io::Reader;
use thiserror::Error;

use crate::MAP_SIZE;

/// Map bitmap decoded to tightly packed RGBA8 rows, top row first.
#[derive(Debug, Clone)]
pub struct MapImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl MapImage {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();

        let reader = Reader::open(path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|source| MapError::Io {
                path: path.to_owned(),
                source,
            })?;

        let image = reader
            .decode()
            .map_err(|source| MapError::Decode {
                path: path.to_owned(),
                source,
            })?
            .to_rgba8();

        let (width, height) = image.dimensions();

        if (width, height) != (MAP_SIZE, MAP_SIZE) {
            log::warn!(
                "{} is {width}x{height}, expected {MAP_SIZE}x{MAP_SIZE}",
                path.display()
            );
        }

        log::info!("loaded map {} ({width}x{height})", path.display());

        Ok(Self {
            width,
            height,
            pixels: image.into_raw(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error("Could not open {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("Could not decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}
