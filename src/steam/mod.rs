//! Minimal Steam Web API client.
//!
//! Only the two read-only endpoints the catalog pipeline chains together are
//! wrapped: vanity resolution and the owned-games listing.

pub mod client;
mod endpoints;
pub mod types;

pub use client::{SteamApi, SteamClient};
pub use types::{
    AccountId, OwnedGameDto, OwnedGamesDto, SteamApiError, SteamApiResponse, VanityDto,
};
