use std::sync::Arc;

use base64::Engine;
use futures::{StreamExt, stream};
use reqwest::Client;
use tiny_skia::Pixmap;
use tracing::{debug, info, trace, warn};
use usvg::fontdb::Database;
use usvg::{Options, Tree};

use crate::catalog::RankedCatalog;
use crate::error::AppError;

use super::cover::{CoverArt, CoverSource};
use super::layout::{MosaicLayout, Packing, Placement};
use super::tier::{SizeTier, classify};

const MOSAIC_TEMPLATE: &str = include_str!("../../assets/mosaic_template.svg");
const TILE_TEMPLATE: &str = include_str!("../../assets/mosaic_tile.svg");
const EMPTY_TEMPLATE: &str = include_str!("../../assets/mosaic_empty.svg");

// Canvas geometry
const GAP_PX: u32 = 4;
const PADDING_PX: u32 = 8;
const BADGE_HEIGHT_PX: u32 = 20;
const BADGE_CHAR_PX: u32 = 8;

const MAX_CONCURRENT_COVER_LOADS: usize = 16;

#[derive(Debug, Clone, Copy)]
pub struct MosaicOptions {
    pub columns: u32,
    pub cell_px: u32,
    pub packing: Packing,
}

impl Default for MosaicOptions {
    fn default() -> Self {
        Self {
            columns: 12,
            cell_px: 64,
            packing: Packing::Sparse,
        }
    }
}

/// What gets drawn for one title, before any image is loaded.
#[derive(Debug, Clone)]
pub struct PlannedTile {
    pub tier: SizeTier,
    pub placement: Placement,
    pub cover: CoverArt,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct MosaicPlan {
    pub layout: MosaicLayout,
    pub tiles: Vec<PlannedTile>,
}

/// Outcome of loading one tile's cover art.
#[derive(Debug, Clone)]
pub struct LoadedCover {
    pub data_uri: Option<String>,
    pub is_fallback: bool,
}

pub struct MosaicRenderer {
    http: Client,
    covers: CoverSource,
    options: MosaicOptions,
    fontdb: Arc<Database>,
}

impl std::fmt::Debug for MosaicRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MosaicRenderer")
            .field("covers", &self.covers)
            .field("options", &self.options)
            .field("fontdb", &"<Database>")
            .finish()
    }
}

impl MosaicRenderer {
    pub fn new(covers: CoverSource, options: MosaicOptions) -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(concat!("Tuvalix/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::ImageGeneration {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        // Load system fonts
        let mut fontdb = Database::new();
        fontdb.load_system_fonts();
        let font_count = fontdb.len();
        info!(font_count, "🖼️ Loaded system fonts");

        Ok(Self {
            http,
            covers,
            options,
            fontdb: Arc::new(fontdb),
        })
    }

    /// Classify, lay out and pick a cover for every title, in rank order.
    pub fn plan(&self, catalog: &RankedCatalog) -> MosaicPlan {
        let tiers: Vec<SizeTier> = catalog
            .titles()
            .iter()
            .map(|t| classify(t.playtime_hours))
            .collect();
        let layout = MosaicLayout::pack(
            tiers.iter().copied(),
            self.options.columns,
            self.options.packing,
        );

        let tiles = catalog
            .titles()
            .iter()
            .zip(tiers)
            .zip(layout.placements())
            .map(|((title, tier), placement)| PlannedTile {
                tier,
                placement: *placement,
                cover: self.covers.cover_for(title.app_id()),
                label: playtime_label(title.playtime_hours),
            })
            .collect();

        MosaicPlan { layout, tiles }
    }

    pub async fn generate_mosaic_image(
        &self,
        catalog: &RankedCatalog,
    ) -> Result<Vec<u8>, AppError> {
        let svg = self.build_svg(catalog).await;
        self.render_svg_to_png(&svg)
    }

    pub async fn build_svg(&self, catalog: &RankedCatalog) -> String {
        if catalog.is_empty() {
            return EMPTY_TEMPLATE.to_string();
        }

        let plan = self.plan(catalog);

        // Each tile walks its own cover state; order is kept by `buffered`.
        let pending: Vec<CoverArt> = plan.tiles.iter().map(|t| t.cover.clone()).collect();
        let covers: Vec<LoadedCover> = stream::iter(pending)
            .map(|cover| self.load_cover(cover))
            .buffered(MAX_CONCURRENT_COVER_LOADS)
            .collect()
            .await;

        let fallbacks = covers.iter().filter(|c| c.is_fallback).count();
        debug!(
            tiles = plan.tiles.len(),
            fallbacks,
            rows = plan.layout.rows(),
            "🖼️ Covers loaded"
        );

        let tiles: String = plan
            .tiles
            .iter()
            .zip(&covers)
            .enumerate()
            .map(|(index, (tile, cover))| self.tile_svg(index, tile, cover))
            .collect();

        let (width, height) = self.canvas_size(&plan.layout);
        MOSAIC_TEMPLATE
            .replace("{{width}}", &width.to_string())
            .replace("{{height}}", &height.to_string())
            .replace("{{tiles}}", &tiles)
    }

    /// Load a cover, failing over to the placeholder at most once.
    pub async fn load_cover(&self, mut cover: CoverArt) -> LoadedCover {
        loop {
            if let Some(data_uri) = self.fetch_data_uri(cover.url()).await {
                return LoadedCover {
                    is_fallback: cover.is_fallback(),
                    data_uri: Some(data_uri),
                };
            }

            let failed_url = cover.url().to_string();
            match cover.on_load_failed() {
                Some(next) => {
                    trace!(url = %failed_url, "🖼️ Cover unavailable, using placeholder");
                    cover = next;
                }
                None => {
                    warn!(url = %failed_url, "🖼️ ⚠️ Placeholder unavailable");
                    return LoadedCover {
                        data_uri: None,
                        is_fallback: true,
                    };
                }
            }
        }
    }

    async fn fetch_data_uri(&self, url: &str) -> Option<String> {
        trace!(url, "🖼️ Fetching image");
        match self.http.get(url).send().await {
            Ok(response) if response.status().is_success() => match response.bytes().await {
                Ok(bytes) => {
                    let Some(mime) = sniff_image_mime(&bytes) else {
                        debug!(url, size = bytes.len(), "🖼️ Not a supported image");
                        return None;
                    };
                    let b64 = base64::engine::general_purpose::STANDARD.encode(&bytes);
                    Some(format!("data:{};base64,{}", mime, b64))
                }
                Err(e) => {
                    warn!(url, error = ?e, "🖼️ ⚠️ Failed to read image bytes");
                    None
                }
            },
            Ok(response) => {
                debug!(
                    url,
                    status = response.status().as_u16(),
                    "🖼️ Image fetch failed"
                );
                None
            }
            Err(e) => {
                warn!(url, error = ?e, "🖼️ ⚠️ Image request failed");
                None
            }
        }
    }

    fn canvas_size(&self, layout: &MosaicLayout) -> (u32, u32) {
        (
            self.span_px(layout.columns()).saturating_add(PADDING_PX * 2),
            self.span_px(layout.rows()).saturating_add(PADDING_PX * 2),
        )
    }

    /// Pixel length of `cells` adjacent cells, gaps included.
    fn span_px(&self, cells: u32) -> u32 {
        if cells == 0 {
            0
        } else {
            cells
                .saturating_mul(self.options.cell_px)
                .saturating_add((cells - 1).saturating_mul(GAP_PX))
        }
    }

    fn offset_px(&self, cell: u32) -> u32 {
        cell.saturating_mul(self.options.cell_px.saturating_add(GAP_PX))
            .saturating_add(PADDING_PX)
    }

    fn tile_svg(&self, index: usize, tile: &PlannedTile, cover: &LoadedCover) -> String {
        let p = tile.placement;
        let w = self.span_px(p.width);
        let h = self.span_px(p.height);
        let badge_w = (tile.label.len() as u32 * BADGE_CHAR_PX + 12).min(w.saturating_sub(12));
        let badge_y = h.saturating_sub(BADGE_HEIGHT_PX + 6);

        let mut svg = TILE_TEMPLATE.to_string();
        svg = svg.replace("{{class_name}}", tile.tier.class_name());
        svg = svg.replace("{{index}}", &index.to_string());
        svg = svg.replace("{{x}}", &self.offset_px(p.column).to_string());
        svg = svg.replace("{{y}}", &self.offset_px(p.row).to_string());
        svg = svg.replace("{{w}}", &w.to_string());
        svg = svg.replace("{{h}}", &h.to_string());
        svg = svg.replace("{{badge_y}}", &badge_y.to_string());
        svg = svg.replace("{{badge_w}}", &badge_w.to_string());
        svg = svg.replace("{{badge_text_x}}", &(6 + badge_w / 2).to_string());
        svg = svg.replace("{{badge_text_y}}", &(badge_y + 14).to_string());
        svg = svg.replace("{{label}}", &tile.label);

        match &cover.data_uri {
            Some(data_uri) => {
                svg = handle_conditional_block(&svg, "cover", true);
                svg.replace("{{cover}}", data_uri)
            }
            None => handle_conditional_block(&svg, "cover", false),
        }
    }

    pub fn render_svg_to_png(&self, svg_content: &str) -> Result<Vec<u8>, AppError> {
        let options = Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };

        let tree =
            Tree::from_str(svg_content, &options).map_err(|e| AppError::ImageGeneration {
                message: format!("Failed to parse SVG: {}", e),
            })?;

        let size = tree.size();
        let width = size.width() as u32;
        let height = size.height() as u32;

        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| AppError::ImageGeneration {
            message: "Failed to create pixmap".to_string(),
        })?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        let png_data = pixmap.encode_png().map_err(|e| AppError::ImageGeneration {
            message: format!("Failed to encode PNG: {}", e),
        })?;

        debug!(
            width,
            height,
            size = png_data.len(),
            "🖼️ ✅ Mosaic generated"
        );
        Ok(png_data)
    }
}

/// Rounded whole hours; titles are never named on the mosaic.
pub fn playtime_label(playtime_hours: f64) -> String {
    format!("{} h", playtime_hours.round() as u64)
}

/// Handle mustache-like conditional blocks: {{#name}}content{{/name}}
fn handle_conditional_block(svg: &str, name: &str, show: bool) -> String {
    let tag_open = format!("{{{{#{}}}}}", name);
    let tag_close = format!("{{{{/{}}}}}", name);

    if show {
        svg.replace(&tag_open, "").replace(&tag_close, "")
    } else {
        let mut result = svg.to_string();
        if let (Some(start), Some(end)) = (result.find(&tag_open), result.find(&tag_close)) {
            result.replace_range(start..end + tag_close.len(), "");
        }
        result
    }
}

/// Image formats the rasteriser can embed. Anything else counts as a failed load.
fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF8") {
        Some("image/gif")
    } else {
        None
    }
}
