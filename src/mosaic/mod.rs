//! Playtime mosaic: size tiers, grid packing and SVG/PNG rendering.

pub mod cover;
pub mod image_gen;
pub mod layout;
pub mod tier;

pub use cover::{CoverArt, CoverSource};
pub use image_gen::{MosaicOptions, MosaicPlan, MosaicRenderer, PlannedTile, playtime_label};
pub use layout::{MosaicLayout, Packing, Placement};
pub use tier::{SizeTier, classify};
