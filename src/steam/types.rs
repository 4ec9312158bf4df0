use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SteamApiError {
    /// Transport failure. The request URL is stripped since it carries the API key.
    #[error("Reqwest error: {0}")]
    Reqwest(reqwest::Error),

    #[error("HTTP status error: {0}")]
    Status(reqwest::StatusCode),

    #[error("Decoding raw response error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A call to the Steam Web API can either result in a success with the success type
/// or fail with a [`SteamApiError`].
pub type SteamApiResponse<T> = Result<T, SteamApiError>;

/// Canonical numeric account identifier (a SteamID64 in practice).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    const CANONICAL_LEN: usize = 17;

    /// Wrap a trimmed, non-empty identifier. The platform stays the authority on validity.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Whether `raw` is exactly 17 ASCII decimal digits.
    pub fn is_canonical_shape(raw: &str) -> bool {
        raw.len() == Self::CANONICAL_LEN && raw.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// ISteamUser/ResolveVanityURL
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VanityEnvelope {
    #[serde(default)]
    pub response: VanityDto,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VanityDto {
    #[serde(default)]
    pub success: u8,
    pub steamid: Option<String>,
    pub message: Option<String>,
}

impl VanityDto {
    /// Canonical id supplied by the platform when the vanity name matched.
    pub fn resolved_id(&self) -> Option<AccountId> {
        if self.success != 1 {
            return None;
        }
        self.steamid.as_deref().and_then(AccountId::new)
    }
}

// ============================================================================
// IPlayerService/GetOwnedGames
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnedGamesEnvelope {
    #[serde(default)]
    pub response: OwnedGamesDto,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnedGamesDto {
    pub game_count: Option<u32>,
    /// Absent for private profiles and empty libraries.
    pub games: Option<Vec<OwnedGameDto>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnedGameDto {
    pub appid: Option<u64>,
    pub name: Option<String>,
    /// Minutes. Null on some malformed entries.
    pub playtime_forever: Option<u64>,
    pub img_icon_url: Option<String>,
    /// Legacy field, still present on some cached responses.
    pub img_logo_url: Option<String>,
}

impl OwnedGameDto {
    pub fn cover_image_key(&self) -> Option<String> {
        [&self.img_icon_url, &self.img_logo_url]
            .into_iter()
            .flatten()
            .find(|key| !key.is_empty())
            .cloned()
    }
}
