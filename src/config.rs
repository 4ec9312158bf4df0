use std::env;
use std::fmt;
use std::net::SocketAddr;

use crate::error::AppError;
use crate::mosaic::{CoverSource, MosaicOptions, Packing};
use crate::steam::SteamClient;

#[derive(Clone)]
pub struct Config {
    pub steam_api_key: String,
    pub bind_addr: SocketAddr,
    pub steam_api_base_url: String,
    pub cover_cdn_base_url: String,
    pub placeholder_cover_url: String,
    pub mosaic: MosaicOptions,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        const DEFAULT_PORT: u16 = 3000;
        const MIN_MOSAIC_COLUMNS: u32 = 4;
        const MAX_MOSAIC_COLUMNS: u32 = 64;
        const MAX_MOSAIC_CELL_PX: u32 = 512;

        let defaults = MosaicOptions::default();

        let steam_api_key = lookup("STEAM_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::Config("STEAM_API_KEY must be set".into()))?;

        let port = lookup("PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let steam_api_base_url = lookup("STEAM_API_BASE_URL")
            .unwrap_or_else(|| SteamClient::DEFAULT_BASE_URL.into());

        let cover_cdn_base_url = lookup("COVER_CDN_BASE_URL")
            .unwrap_or_else(|| CoverSource::DEFAULT_CDN_BASE_URL.into());

        let placeholder_cover_url = lookup("PLACEHOLDER_COVER_URL")
            .unwrap_or_else(|| CoverSource::DEFAULT_PLACEHOLDER_URL.into());

        let columns = lookup("MOSAIC_COLUMNS")
            .and_then(|v| v.parse().ok())
            .filter(|c| *c >= MIN_MOSAIC_COLUMNS)
            .map(|c: u32| c.min(MAX_MOSAIC_COLUMNS))
            .unwrap_or(defaults.columns);

        let cell_px = lookup("MOSAIC_CELL_PX")
            .and_then(|v| v.parse().ok())
            .filter(|px| *px > 0)
            .map(|px: u32| px.min(MAX_MOSAIC_CELL_PX))
            .unwrap_or(defaults.cell_px);

        let packing = match lookup("MOSAIC_DENSE_PACKING").as_deref() {
            Some("1" | "true" | "yes") => Packing::Dense,
            _ => Packing::Sparse,
        };

        Ok(Self {
            steam_api_key: steam_api_key.trim().to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            steam_api_base_url,
            cover_cdn_base_url,
            placeholder_cover_url,
            mosaic: MosaicOptions {
                columns,
                cell_px,
                packing,
            },
        })
    }

    pub fn cover_source(&self) -> CoverSource {
        CoverSource::new(&self.cover_cdn_base_url, &self.placeholder_cover_url)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("steam_api_key", &"<redacted>")
            .field("bind_addr", &self.bind_addr)
            .field("steam_api_base_url", &self.steam_api_base_url)
            .field("cover_cdn_base_url", &self.cover_cdn_base_url)
            .field("placeholder_cover_url", &self.placeholder_cover_url)
            .field("mosaic", &self.mosaic)
            .finish()
    }
}
