//! Decomposition of an image (or a region of it) into a grid of tiles.
//!
//! Tiles are numbered from 1, row-major: tile `i` sits at column `(i - 1) % tiles_x` and row
//! `(i - 1) / tiles_x`. Every tile is `region_width / tiles_x` by `region_height / tiles_y`
//! pixels, except the last column and the last row which also take the remainder, so the
//! tiles always cover the whole region exactly once.

use std::ops::Range;

use crate::error::InvalidTileConfiguration;

/// A rectangle of pixels, `x`/`y` being its top left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub fn xs(&self) -> Range<u32> {
        self.x..self.x + self.width
    }

    pub fn ys(&self) -> Range<u32> {
        self.y..self.y + self.height
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.xs().contains(&x) && self.ys().contains(&y)
    }
}

/// 1-based, row-major tile index
pub type TileIndex = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    image_width: u32,
    image_height: u32,
    region: Region,
    tiles_x: u32,
    tiles_y: u32,
}

fn invalid(reason: impl Into<String>) -> InvalidTileConfiguration {
    InvalidTileConfiguration {
        reason: reason.into(),
    }
}

impl TileGrid {
    /// Splits `region` (the whole image if `None`) into `tiles_x` x `tiles_y` tiles
    pub fn new(
        image_width: u32,
        image_height: u32,
        tiles_x: u32,
        tiles_y: u32,
        region: Option<Region>,
    ) -> Result<Self, InvalidTileConfiguration> {
        if image_width == 0 || image_height == 0 {
            return Err(invalid(format!(
                "image must not be empty, got {image_width}x{image_height}"
            )));
        }
        let region = region.unwrap_or(Region::full(image_width, image_height));
        if region.width == 0 || region.height == 0 {
            return Err(invalid(format!(
                "region must not be empty, got {}x{}",
                region.width, region.height
            )));
        }
        let inside = region
            .x
            .checked_add(region.width)
            .zip(region.y.checked_add(region.height))
            .map_or(false, |(end_x, end_y)| {
                end_x <= image_width && end_y <= image_height
            });
        if !inside {
            return Err(invalid(format!(
                "region {}x{} at ({}, {}) leaves the {image_width}x{image_height} image",
                region.width, region.height, region.x, region.y
            )));
        }
        if tiles_x == 0 || tiles_y == 0 {
            return Err(invalid(format!(
                "tile counts must be at least 1, got {tiles_x}x{tiles_y}"
            )));
        }
        if tiles_x > region.width || tiles_y > region.height {
            return Err(invalid(format!(
                "{tiles_x}x{tiles_y} tiles do not fit in {}x{} pixels",
                region.width, region.height
            )));
        }
        if tiles_x.checked_mul(tiles_y).is_none() {
            return Err(invalid("too many tiles"));
        }

        Ok(Self {
            image_width,
            image_height,
            region,
            tiles_x,
            tiles_y,
        })
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn tiles_x(&self) -> u32 {
        self.tiles_x
    }

    pub fn tiles_y(&self) -> u32 {
        self.tiles_y
    }

    pub fn tile_count(&self) -> u32 {
        self.tiles_x * self.tiles_y
    }

    /// Nominal tile size, edge tiles may be larger
    pub fn tile_size(&self) -> (u32, u32) {
        (
            self.region.width / self.tiles_x,
            self.region.height / self.tiles_y,
        )
    }

    pub fn indices(&self) -> impl Iterator<Item = TileIndex> {
        1..=self.tile_count()
    }

    /// `(row, column)` of tile `index`, both 0-based
    pub fn position(&self, index: TileIndex) -> Option<(u32, u32)> {
        (1..=self.tile_count())
            .contains(&index)
            .then(|| ((index - 1) / self.tiles_x, (index - 1) % self.tiles_x))
    }

    /// Pixel bounds of tile `index`, in image coordinates
    pub fn tile(&self, index: TileIndex) -> Option<Region> {
        let (row, col) = self.position(index)?;
        let (tile_w, tile_h) = self.tile_size();

        let width = if col == self.tiles_x - 1 {
            self.region.width - col * tile_w
        } else {
            tile_w
        };
        let height = if row == self.tiles_y - 1 {
            self.region.height - row * tile_h
        } else {
            tile_h
        };

        Some(Region {
            x: self.region.x + col * tile_w,
            y: self.region.y + row * tile_h,
            width,
            height,
        })
    }
}
