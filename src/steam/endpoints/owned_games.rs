use crate::steam::client::SteamClient;
use crate::steam::types::{AccountId, OwnedGamesDto, OwnedGamesEnvelope, SteamApiResponse};

impl SteamClient {
    /// Get the whole owned library of an account, played free titles included.
    /// Private profiles come back without a `games` list.
    pub async fn get_owned_games(&self, account_id: &AccountId) -> SteamApiResponse<OwnedGamesDto> {
        let envelope: OwnedGamesEnvelope = self
            .get(
                "/IPlayerService/GetOwnedGames/v0001/",
                &[
                    ("steamid", account_id.as_str()),
                    ("include_appinfo", "1"),
                    ("include_played_free_games", "1"),
                    ("format", "json"),
                ],
            )
            .await?;

        Ok(envelope.response)
    }
}
