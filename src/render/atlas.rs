//! Sprite atlas packer.
//!
//! Packs one raster asset per registry entry into a fixed-column grid, in
//! registry order. Every cell is `size` x `size`; the `k`-th emoji lands in
//! column `k % columns`, row `k / columns`. The layout depends only on the
//! registry order and the size, so coordinates are stable across builds.

use std::path::Path;

use image::{imageops, RgbaImage};

use crate::error::{MojiError, Result};
use crate::registry::Registry;
use crate::types::Codepoints;

use super::resolve::resolve_asset;

/// Column count used for every bundle atlas.
pub const COLUMNS: u32 = 32;

/// Top-left pixel offset of one glyph's cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasLocation {
    pub emoji: Codepoints,
    pub x: u32,
    pub y: u32,
}

/// A composited atlas for one pixel size.
#[derive(Debug)]
pub struct Atlas {
    pub size: u32,
    pub canvas: RgbaImage,
    /// Locations in registry order.
    pub locations: Vec<AtlasLocation>,
}

/// Fixed-grid atlas packer.
#[derive(Debug, Clone, Copy)]
pub struct AtlasPacker {
    pub columns: u32,
}

impl Default for AtlasPacker {
    fn default() -> Self {
        Self::new(COLUMNS)
    }
}

impl AtlasPacker {
    pub fn new(columns: u32) -> Self {
        Self {
            columns: columns.max(1),
        }
    }

    /// Canvas dimensions for `count` glyphs of `size` pixels.
    ///
    /// Rows are `ceil(count / columns)`, so zero glyphs give a zero-height
    /// canvas.
    pub fn dimensions(&self, count: usize, size: u32) -> (u32, u32) {
        let rows = (count as u32).div_ceil(self.columns);
        (self.columns * size, rows * size)
    }

    /// Pixel offset of the `index`-th cell.
    pub fn cell(&self, index: usize, size: u32) -> (u32, u32) {
        let index = index as u32;
        let col = index % self.columns;
        let row = index / self.columns;
        (col * size, row * size)
    }

    /// Compute every glyph location without touching any image.
    pub fn layout(&self, registry: &Registry, size: u32) -> Vec<AtlasLocation> {
        registry
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let (x, y) = self.cell(index, size);
                AtlasLocation {
                    emoji: record.codepoints.clone(),
                    x,
                    y,
                }
            })
            .collect()
    }

    /// Resolve, load and composite every registry entry from `raster_dir`.
    ///
    /// Compositing is sequential: cells come from a running counter over
    /// registry order. Assets are drawn unscaled; anything larger than the
    /// cell is clipped to it. The first unresolved emoji aborts packing.
    pub fn pack(&self, registry: &Registry, size: u32, raster_dir: &Path) -> Result<Atlas> {
        let (width, height) = self.dimensions(registry.len(), size);
        let mut canvas = RgbaImage::new(width, height);
        let locations = self.layout(registry, size);

        for location in &locations {
            let path = resolve_asset(raster_dir, &location.emoji, size)?;
            let glyph = image::open(&path)
                .map_err(|e| MojiError::io(&path, "Failed to load raster asset", e))?
                .to_rgba8();

            let glyph = if glyph.width() > size || glyph.height() > size {
                imageops::crop_imm(&glyph, 0, 0, size, size).to_image()
            } else {
                glyph
            };

            imageops::overlay(&mut canvas, &glyph, location.x as i64, location.y as i64);
        }

        Ok(Atlas {
            size,
            canvas,
            locations,
        })
    }
}
