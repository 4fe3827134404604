//! Rendering module for mojipack.
//!
//! Turns SVG artwork into per-size raster assets, resolves emojis to those
//! assets, and packs them into sprite atlases.

mod atlas;
mod raster;
mod resolve;

pub use atlas::{Atlas, AtlasLocation, AtlasPacker, COLUMNS};
pub use raster::{raster_dir, rasterize_all, RasterOutcome, Rasterize, SvgRasterizer};
pub use resolve::{asset_candidates, resolve_asset, RASTER_EXT};
