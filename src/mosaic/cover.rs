/// Where cover art comes from.
#[derive(Debug, Clone)]
pub struct CoverSource {
    cdn_base_url: String,
    placeholder_url: String,
}

impl CoverSource {
    pub const DEFAULT_CDN_BASE_URL: &'static str =
        "https://cdn.cloudflare.steamstatic.com/steam/apps";
    pub const DEFAULT_PLACEHOLDER_URL: &'static str =
        "https://placehold.co/640x360/111111/ffffff/png?text=No+Cover";

    pub fn new(cdn_base_url: impl Into<String>, placeholder_url: impl Into<String>) -> Self {
        Self {
            cdn_base_url: cdn_base_url.into().trim_end_matches('/').to_string(),
            placeholder_url: placeholder_url.into(),
        }
    }

    /// Starting state for a title: its store header, or the placeholder when it has no usable id.
    pub fn cover_for(&self, app_id: Option<u64>) -> CoverArt {
        match app_id.filter(|id| *id != 0) {
            Some(id) => CoverArt::Primary {
                url: format!("{}/{}/header.jpg", self.cdn_base_url, id),
                fallback: self.placeholder_url.clone(),
            },
            None => CoverArt::Fallback {
                url: self.placeholder_url.clone(),
            },
        }
    }
}

impl Default for CoverSource {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CDN_BASE_URL, Self::DEFAULT_PLACEHOLDER_URL)
    }
}

/// Per-tile image state. `Primary` may fail over once; `Fallback` never transitions again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverArt {
    Primary { url: String, fallback: String },
    Fallback { url: String },
}

impl CoverArt {
    pub fn url(&self) -> &str {
        match self {
            CoverArt::Primary { url, .. } | CoverArt::Fallback { url } => url,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, CoverArt::Fallback { .. })
    }

    /// Transition after the current url failed to load. `None` once the fallback itself failed.
    pub fn on_load_failed(self) -> Option<CoverArt> {
        match self {
            CoverArt::Primary { fallback, .. } => Some(CoverArt::Fallback { url: fallback }),
            CoverArt::Fallback { .. } => None,
        }
    }
}
