use std::fmt::{self, Debug};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::types::{AccountId, OwnedGamesDto, SteamApiError, SteamApiResponse, VanityDto};

/// Steam Web API surface used by the catalog pipeline.
///
/// Implemented by [`SteamClient`] for the real platform; tests plug in fakes.
#[async_trait]
pub trait SteamApi: Send + Sync + Debug {
    /// ISteamUser/ResolveVanityURL.
    async fn resolve_vanity_url(&self, vanity: &str) -> SteamApiResponse<VanityDto>;

    /// IPlayerService/GetOwnedGames with app info and played free games included.
    async fn get_owned_games(&self, account_id: &AccountId) -> SteamApiResponse<OwnedGamesDto>;
}

pub struct SteamClient {
    http: reqwest::Client,
    /// Steam Web API key, sent as the `key` query parameter
    key: String,
    base_url: String,
}

impl SteamClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.steampowered.com";

    pub fn new(key: String, base_url: impl Into<String>) -> SteamApiResponse<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("Tuvalix/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SteamApiError::Reqwest(e.without_url()))?;

        Ok(Self {
            http,
            key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Shared GET logic: attach the key, check the status, decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> SteamApiResponse<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::trace!(path, "[STEAM::CLIENT] GET");

        let res = self
            .http
            .get(url)
            .query(&[("key", self.key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| SteamApiError::Reqwest(e.without_url()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(SteamApiError::Status(status));
        }

        let body = res
            .bytes()
            .await
            .map_err(|e| SteamApiError::Reqwest(e.without_url()))?;

        serde_json::from_slice(&body).map_err(SteamApiError::Serde)
    }
}

impl Debug for SteamClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SteamClient")
            .field("base_url", &self.base_url)
            .field("key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl SteamApi for SteamClient {
    async fn resolve_vanity_url(&self, vanity: &str) -> SteamApiResponse<VanityDto> {
        SteamClient::resolve_vanity_url(self, vanity).await
    }

    async fn get_owned_games(&self, account_id: &AccountId) -> SteamApiResponse<OwnedGamesDto> {
        SteamClient::get_owned_games(self, account_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::SteamClient;
    use crate::steam::types::{AccountId, SteamApiError, SteamApiResponse};

    fn api_key() -> String {
        dotenvy::dotenv().ok();
        env::var("STEAM_API_KEY").expect("STEAM_API_KEY not set")
    }

    #[tokio::test]
    #[ignore = "API Key required"]
    async fn resolve_vanity_url_works() {
        let client = SteamClient::new(api_key(), SteamClient::DEFAULT_BASE_URL).unwrap();

        let vanity = client.resolve_vanity_url("gabelogannewell").await.unwrap();

        assert_eq!(vanity.success, 1);
        assert_eq!(vanity.steamid.as_deref(), Some("76561197960287930"));
    }

    #[tokio::test]
    #[ignore = "API Key required"]
    async fn get_owned_games_works() {
        let client = SteamClient::new(api_key(), SteamClient::DEFAULT_BASE_URL).unwrap();
        let id = AccountId::new("76561197960287930").unwrap();

        let owned = client.get_owned_games(&id).await.unwrap();

        println!("Owned games fetched: {:?}", owned.game_count);
    }

    #[tokio::test]
    async fn request_propagates_reqwest_error() {
        let client = SteamClient::new("TEST_KEY".into(), "ht!tp://invalid-url").unwrap();

        let res: SteamApiResponse<()> = client.get("/nowhere", &[]).await;

        assert!(matches!(res, Err(SteamApiError::Reqwest(_))));
    }

    #[test]
    fn debug_output_redacts_key() {
        let client = SteamClient::new("SUPER_SECRET".into(), "http://localhost/").unwrap();

        let rendered = format!("{:?}", client);

        assert!(!rendered.contains("SUPER_SECRET"));
        assert!(rendered.contains("http://localhost\""));
    }
}
