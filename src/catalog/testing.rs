//! In-memory [`SteamApi`] used by the catalog unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::steam::{
    AccountId, OwnedGameDto, OwnedGamesDto, SteamApi, SteamApiError, SteamApiResponse, VanityDto,
};

#[derive(Debug, Default)]
pub struct FakeSteam {
    /// vanity name -> canonical id
    pub vanity: HashMap<String, String>,
    pub vanity_status: Option<StatusCode>,
    /// `None` mimics a private profile (no `games` key at all)
    pub games: Option<Vec<OwnedGameDto>>,
    pub games_status: Option<StatusCode>,
    pub vanity_calls: AtomicUsize,
    pub games_calls: AtomicUsize,
    pub last_account: Mutex<Option<AccountId>>,
}

impl FakeSteam {
    pub fn resolving(handle: &str, id: &str) -> Self {
        Self {
            vanity: HashMap::from([(handle.to_string(), id.to_string())]),
            ..Default::default()
        }
    }

    pub fn with_games(mut self, games: Vec<OwnedGameDto>) -> Self {
        self.games = Some(games);
        self
    }

    pub fn vanity_calls(&self) -> usize {
        self.vanity_calls.load(Ordering::SeqCst)
    }

    pub fn games_calls(&self) -> usize {
        self.games_calls.load(Ordering::SeqCst)
    }

    pub fn last_account(&self) -> Option<AccountId> {
        self.last_account.lock().unwrap().clone()
    }
}

pub fn game(appid: u64, name: &str, minutes: u64) -> OwnedGameDto {
    OwnedGameDto {
        appid: Some(appid),
        name: Some(name.to_string()),
        playtime_forever: Some(minutes),
        ..Default::default()
    }
}

#[async_trait]
impl SteamApi for FakeSteam {
    async fn resolve_vanity_url(&self, vanity: &str) -> SteamApiResponse<VanityDto> {
        self.vanity_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.vanity_status {
            return Err(SteamApiError::Status(status));
        }

        Ok(match self.vanity.get(vanity) {
            Some(id) => VanityDto {
                success: 1,
                steamid: Some(id.clone()),
                message: None,
            },
            None => VanityDto {
                success: 42,
                steamid: None,
                message: Some("No match".into()),
            },
        })
    }

    async fn get_owned_games(&self, account_id: &AccountId) -> SteamApiResponse<OwnedGamesDto> {
        self.games_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_account.lock().unwrap() = Some(account_id.clone());
        if let Some(status) = self.games_status {
            return Err(SteamApiError::Status(status));
        }

        Ok(OwnedGamesDto {
            game_count: self.games.as_ref().map(|g| g.len() as u32),
            games: self.games.clone(),
        })
    }
}
