//! Several grayscale rasters tiled on one canvas.
//!
//! Tiles are square cells of `tile_size` pixels separated by `margin`
//! pixels. Each image is scaled so that its longer side fills the cell and
//! is placed at the top-left corner of its cell, in row-major order.

use serde::{Deserialize, Serialize};

/// Largest number of images a mosaic accepts.
pub const MAX_IMAGES: usize = 12;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MosaicError {
    #[error("mosaic needs at least one image")]
    Empty,
    #[error("mosaic holds at most {max} images, got {count}")]
    TooMany { count: usize, max: usize },
    #[error("image {index} has zero width or height")]
    EmptyImage { index: usize },
    #[error("invalid mosaic layout: {0}")]
    InvalidLayout(String),
}

/// Mosaic configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MosaicLayout {
    /// Upper bound on tiles per row. The column count is
    /// [`default_columns`] for the image count, capped by this.
    pub max_columns: usize,
    /// Cell side in pixels. `None` picks it from the image count.
    pub tile_size: Option<u32>,
    /// Gap between cells and around the border, in pixels.
    pub margin: u32,
    /// Canvas fill value.
    pub background: u8,
}

impl Default for MosaicLayout {
    fn default() -> Self {
        Self {
            max_columns: 4,
            tile_size: None,
            margin: 20,
            background: 0,
        }
    }
}

/// Cell side used when the layout does not fix one.
pub fn default_tile_size(count: usize) -> u32 {
    match count {
        0..=4 => 300,
        5..=8 => 200,
        _ => 150,
    }
}

/// Column count for `count` images: 1, 2 up to four images, 3 up to six,
/// 4 beyond.
pub fn default_columns(count: usize) -> usize {
    match count {
        0..=1 => 1,
        2..=4 => 2,
        5..=6 => 3,
        _ => 4,
    }
}

/// Resolved geometry of a mosaic for a given image count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MosaicGrid {
    pub columns: u32,
    pub rows: u32,
    pub tile_size: u32,
    pub margin: u32,
    pub width: u32,
    pub height: u32,
}

impl MosaicLayout {
    pub fn grid(&self, count: usize) -> Result<MosaicGrid, MosaicError> {
        if count == 0 {
            return Err(MosaicError::Empty);
        }
        if count > MAX_IMAGES {
            return Err(MosaicError::TooMany {
                count,
                max: MAX_IMAGES,
            });
        }
        if self.max_columns == 0 {
            return Err(MosaicError::InvalidLayout(
                "max_columns must be positive".into(),
            ));
        }
        let tile_size = self.tile_size.unwrap_or_else(|| default_tile_size(count));
        if tile_size == 0 {
            return Err(MosaicError::InvalidLayout(
                "tile_size must be positive".into(),
            ));
        }

        // count <= MAX_IMAGES, so both fit in u32.
        let columns = default_columns(count).min(self.max_columns) as u32;
        let rows = count.div_ceil(columns as usize) as u32;

        let extent = |cells: u32| {
            tile_size
                .checked_add(self.margin)
                .and_then(|step| step.checked_mul(cells))
                .and_then(|v| v.checked_add(self.margin))
                .ok_or_else(|| MosaicError::InvalidLayout("canvas size overflows u32".into()))
        };

        Ok(MosaicGrid {
            columns,
            rows,
            tile_size,
            margin: self.margin,
            width: extent(columns)?,
            height: extent(rows)?,
        })
    }
}

impl MosaicGrid {
    /// Top-left corner of cell `index`.
    pub fn origin(&self, index: usize) -> (u32, u32) {
        let index = index as u32;
        let step = self.tile_size + self.margin;
        let col = index % self.columns;
        let row = index / self.columns;
        (self.margin + col * step, self.margin + row * step)
    }

    /// Size of a `width` x `height` image scaled so its longer side equals
    /// the tile size.
    pub fn fit(&self, width: u32, height: u32) -> (u32, u32) {
        let longest = width.max(height).max(1) as u64;
        let scale = |v: u32| ((v as u64 * self.tile_size as u64) / longest).max(1) as u32;
        (scale(width), scale(height))
    }
}

#[cfg(feature = "image")]
pub use compose::compose_mosaic;

#[cfg(feature = "image")]
mod compose {
    use super::{MosaicError, MosaicLayout};
    use image::imageops::{self, FilterType};
    use image::{GrayImage, Luma};
    use log::debug;

    /// Tile `images` onto one canvas according to `layout`.
    pub fn compose_mosaic(
        images: &[GrayImage],
        layout: &MosaicLayout,
    ) -> Result<GrayImage, MosaicError> {
        let grid = layout.grid(images.len())?;
        if let Some(index) = images
            .iter()
            .position(|img| img.width() == 0 || img.height() == 0)
        {
            return Err(MosaicError::EmptyImage { index });
        }

        debug!(
            "mosaic: {} images in {}x{} cells of {} px, canvas {}x{}",
            images.len(),
            grid.columns,
            grid.rows,
            grid.tile_size,
            grid.width,
            grid.height
        );

        let mut canvas = GrayImage::from_pixel(grid.width, grid.height, Luma([layout.background]));
        for (i, img) in images.iter().enumerate() {
            let (w, h) = grid.fit(img.width(), img.height());
            let tile = imageops::resize(img, w, h, FilterType::Triangle);
            let (x, y) = grid.origin(i);
            imageops::replace(&mut canvas, &tile, x as i64, y as i64);
        }
        Ok(canvas)
    }
}
