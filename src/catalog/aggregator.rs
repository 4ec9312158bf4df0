use std::sync::Arc;

use tracing::debug;

use crate::steam::{AccountId, SteamApi, SteamApiResponse};

use super::types::{OwnedTitle, RankedCatalog};

/// Fetches an account's owned library and ranks it by playtime.
#[derive(Debug, Clone)]
pub struct Aggregator {
    api: Arc<dyn SteamApi>,
}

impl Aggregator {
    pub fn new(api: Arc<dyn SteamApi>) -> Self {
        Self { api }
    }

    /// A missing title list (private profile, empty library) is an empty catalog.
    pub async fn fetch_catalog(&self, account_id: &AccountId) -> SteamApiResponse<RankedCatalog> {
        let owned = self.api.get_owned_games(account_id).await?;
        let games = owned.games.unwrap_or_default();
        let owned_count = games.len();

        let catalog = RankedCatalog::rank(games.into_iter().map(OwnedTitle::from_dto));

        debug!(
            account_id = %account_id,
            owned = owned_count,
            played = catalog.len(),
            "📚 Catalog ranked"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::StatusCode;

    use crate::catalog::testing::{FakeSteam, game};
    use crate::steam::{AccountId, OwnedGameDto, SteamApiError};

    use super::Aggregator;

    fn account() -> AccountId {
        AccountId::new("76561198000000000").unwrap()
    }

    #[tokio::test]
    async fn filters_and_ranks_owned_games() {
        let fake = FakeSteam::default().with_games(vec![
            game(10, "ten", 30),
            game(20, "never", 0),
            game(30, "thirty", 6000),
            game(40, "forty", 600),
        ]);
        let aggregator = Aggregator::new(Arc::new(fake));

        let catalog = aggregator.fetch_catalog(&account()).await.unwrap();

        let ids: Vec<_> = catalog.titles().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![Some(30), Some(40), Some(10)]);
        assert_eq!(catalog.titles()[0].playtime_hours, 100.0);
    }

    #[tokio::test]
    async fn missing_games_list_is_an_empty_catalog() {
        let aggregator = Aggregator::new(Arc::new(FakeSteam::default()));

        let catalog = aggregator.fetch_catalog(&account()).await.unwrap();

        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn only_unplayed_games_is_an_empty_catalog() {
        let fake = FakeSteam::default().with_games(vec![game(1, "a", 0), game(2, "b", 0)]);
        let aggregator = Aggregator::new(Arc::new(fake));

        assert!(aggregator.fetch_catalog(&account()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn null_playtime_entry_is_dropped() {
        let fake = FakeSteam::default().with_games(vec![
            game(440, "played", 6000),
            OwnedGameDto {
                appid: Some(0),
                playtime_forever: None,
                ..Default::default()
            },
        ]);
        let aggregator = Aggregator::new(Arc::new(fake));

        let catalog = aggregator.fetch_catalog(&account()).await.unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.titles()[0].id, Some(440));
    }

    #[tokio::test]
    async fn duplicate_ids_are_preserved() {
        let fake = FakeSteam::default().with_games(vec![game(5, "base", 120), game(5, "demo", 60)]);
        let aggregator = Aggregator::new(Arc::new(fake));

        let catalog = aggregator.fetch_catalog(&account()).await.unwrap();

        assert_eq!(catalog.len(), 2);
    }

    #[tokio::test]
    async fn status_error_is_propagated() {
        let fake = FakeSteam {
            games_status: Some(StatusCode::FORBIDDEN),
            ..Default::default()
        };
        let aggregator = Aggregator::new(Arc::new(fake));

        let res = aggregator.fetch_catalog(&account()).await;

        assert!(matches!(
            res,
            Err(SteamApiError::Status(StatusCode::FORBIDDEN))
        ));
    }
}
