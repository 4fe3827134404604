//! Rasterization stage: SVG artwork to per-size PNG directories.
//!
//! For each requested size every SVG is rendered once into `png-<size>/`
//! under the output directory, keeping the SVG's file stem.
//!
//! # Resume policy
//!
//! If `png-<size>/` already exists the size is skipped entirely. The
//! contents are not checked, so a directory left behind by a run with
//! different artwork is reused as-is; delete it to force a rebuild.
//! Conversions are written to `png-<size>.partial/` and renamed into place
//! only once every conversion for that size succeeded, so an interrupted
//! run never leaves a directory that looks complete.

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use rayon::prelude::*;
use resvg::{tiny_skia, usvg};

use crate::error::{MojiError, Result};

use super::resolve::RASTER_EXT;

/// Converts a vector asset into a square raster image.
pub trait Rasterize: Sync {
    /// Render `source` to an image of exactly `size` x `size` pixels.
    fn rasterize(&self, source: &Path, size: u32) -> Result<RgbaImage>;
}

/// SVG rasterizer backed by resvg.
///
/// The drawing is scaled independently on each axis to fill the square.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgRasterizer;

impl SvgRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Rasterize for SvgRasterizer {
    fn rasterize(&self, source: &Path, size: u32) -> Result<RgbaImage> {
        let data = fs::read(source).map_err(|e| MojiError::io(source, "Failed to read SVG", e))?;

        let tree = usvg::Tree::from_data(&data, &usvg::Options::default()).map_err(|e| MojiError::Raster {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut pixmap = tiny_skia::Pixmap::new(size, size).ok_or_else(|| MojiError::Raster {
            path: source.to_path_buf(),
            message: format!("cannot allocate a {}x{} pixmap", size, size),
        })?;

        let svg_size = tree.size();
        let transform = tiny_skia::Transform::from_scale(
            size as f32 / svg_size.width(),
            size as f32 / svg_size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        // tiny-skia stores premultiplied alpha; images on disk are straight.
        let mut raw = Vec::with_capacity((size * size * 4) as usize);
        for pixel in pixmap.pixels() {
            let c = pixel.demultiply();
            raw.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }

        RgbaImage::from_raw(size, size, raw).ok_or_else(|| MojiError::Raster {
            path: source.to_path_buf(),
            message: "pixel buffer does not match image size".to_string(),
        })
    }
}

/// Directory holding the rasterized assets for one size.
pub fn raster_dir(output: &Path, size: u32) -> PathBuf {
    output.join(format!("png-{}", size))
}

fn staging_dir(output: &Path, size: u32) -> PathBuf {
    output.join(format!("png-{}.partial", size))
}

/// What the stage did for one size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterOutcome {
    /// Output already existed; nothing converted.
    Skipped { size: u32 },
    /// Every asset converted.
    Rasterized { size: u32, count: usize },
}

/// Ensure `png-<size>/` exists under `output` for every size.
///
/// All pending (asset, size) conversions run in parallel. Outcomes are
/// returned in the order of `sizes`. Any failed conversion aborts the stage
/// before any pending size is renamed into place.
pub fn rasterize_all(
    assets: &[PathBuf],
    output: &Path,
    sizes: &[u32],
    rasterizer: &dyn Rasterize,
) -> Result<Vec<RasterOutcome>> {
    let pending: Vec<u32> = sizes
        .iter()
        .copied()
        .filter(|&size| !raster_dir(output, size).exists())
        .collect();

    for &size in &pending {
        let staging = staging_dir(output, size);
        if staging.exists() {
            fs::remove_dir_all(&staging)
                .map_err(|e| MojiError::io(&staging, "Failed to clear stale staging directory", e))?;
        }
        fs::create_dir_all(&staging)
            .map_err(|e| MojiError::io(&staging, "Failed to create staging directory", e))?;
    }

    let jobs: Vec<(&PathBuf, u32)> = pending
        .iter()
        .flat_map(|&size| assets.iter().map(move |asset| (asset, size)))
        .collect();

    jobs.par_iter().try_for_each(|&(asset, size)| {
        let image = rasterizer.rasterize(asset, size)?;
        let target = staged_path(output, asset, size)?;
        image
            .save_with_format(&target, ImageFormat::Png)
            .map_err(|e| MojiError::io(&target, "Failed to write raster asset", e))
    })?;

    for &size in &pending {
        let staging = staging_dir(output, size);
        let done = raster_dir(output, size);
        fs::rename(&staging, &done)
            .map_err(|e| MojiError::io(&done, "Failed to finalize raster directory", e))?;
    }

    Ok(sizes
        .iter()
        .map(|&size| {
            if pending.contains(&size) {
                RasterOutcome::Rasterized {
                    size,
                    count: assets.len(),
                }
            } else {
                RasterOutcome::Skipped { size }
            }
        })
        .collect())
}

fn staged_path(output: &Path, asset: &Path, size: u32) -> Result<PathBuf> {
    let stem = asset
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| MojiError::malformed(asset, "asset file name is not valid UTF-8"))?;
    Ok(staging_dir(output, size).join(format!("{}.{}", stem, RASTER_EXT)))
}
