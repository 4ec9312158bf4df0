use serde::Serialize;

use crate::steam::OwnedGameDto;

const MINUTES_PER_HOUR: f64 = 60.0;

/// One played title of a catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedTitle {
    /// Platform app id; `None` or `0` for malformed upstream entries.
    pub id: Option<u64>,
    pub display_name: Option<String>,
    pub playtime_minutes: u64,
    pub playtime_hours: f64,
    pub cover_image_key: Option<String>,
}

impl OwnedTitle {
    pub fn from_dto(dto: OwnedGameDto) -> Self {
        let cover_image_key = dto.cover_image_key();
        let minutes = dto.playtime_forever.unwrap_or(0);
        Self {
            id: dto.appid,
            display_name: dto.name,
            playtime_minutes: minutes,
            playtime_hours: minutes as f64 / MINUTES_PER_HOUR,
            cover_image_key,
        }
    }

    /// App id usable for addressing cover art.
    pub fn app_id(&self) -> Option<u64> {
        self.id.filter(|id| *id != 0)
    }
}

/// Played titles ordered by playtime, highest first.
///
/// Serialises as `{ "titles": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankedCatalog {
    titles: Vec<OwnedTitle>,
}

impl RankedCatalog {
    /// Keep played titles only and rank them. The sort is stable so ties keep upstream order.
    pub fn rank(titles: impl IntoIterator<Item = OwnedTitle>) -> Self {
        let mut titles: Vec<OwnedTitle> = titles
            .into_iter()
            .filter(|t| t.playtime_minutes > 0)
            .collect();
        titles.sort_by(|a, b| b.playtime_minutes.cmp(&a.playtime_minutes));

        Self { titles }
    }

    pub fn titles(&self) -> &[OwnedTitle] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Sum of every ranked title's playtime, in hours.
    pub fn total_hours(&self) -> f64 {
        self.titles.iter().map(|t| t.playtime_hours).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::game;

    #[test]
    fn from_dto_derives_unrounded_hours() {
        let title = OwnedTitle::from_dto(game(10, "Ten", 90));
        assert_eq!(title.playtime_hours, 1.5);
        assert_eq!(title.app_id(), Some(10));
    }

    #[test]
    fn zero_or_missing_id_has_no_app_id() {
        let zero = OwnedTitle::from_dto(game(0, "Zero", 5));
        assert_eq!(zero.app_id(), None);

        let missing = OwnedTitle::from_dto(OwnedGameDto {
            playtime_forever: Some(5),
            ..Default::default()
        });
        assert_eq!(missing.app_id(), None);
    }

    #[test]
    fn rank_drops_unplayed_and_sorts_descending() {
        let catalog = RankedCatalog::rank(
            [
                game(1, "a", 60),
                game(2, "b", 0),
                game(3, "c", 600),
                game(4, "d", 1),
            ]
            .into_iter()
            .map(OwnedTitle::from_dto),
        );

        let ids: Vec<_> = catalog.titles().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![Some(3), Some(1), Some(4)]);
        assert!(catalog.titles().iter().all(|t| t.playtime_minutes > 0));
        assert!(
            catalog
                .titles()
                .windows(2)
                .all(|w| w[0].playtime_hours >= w[1].playtime_hours)
        );
    }

    #[test]
    fn rank_keeps_upstream_order_on_ties() {
        let catalog = RankedCatalog::rank(
            [
                game(7, "first", 120),
                game(8, "big", 500),
                game(9, "second", 120),
                game(10, "third", 120),
            ]
            .into_iter()
            .map(OwnedTitle::from_dto),
        );

        let ids: Vec<_> = catalog.titles().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![Some(8), Some(7), Some(9), Some(10)]);
    }

    #[test]
    fn serialises_camel_case_under_titles() {
        let catalog = RankedCatalog::rank([OwnedTitle::from_dto(game(440, "TF2", 6000))]);

        let json = serde_json::to_value(&catalog).unwrap();

        assert_eq!(json["titles"][0]["id"], 440);
        assert_eq!(json["titles"][0]["displayName"], "TF2");
        assert_eq!(json["titles"][0]["playtimeMinutes"], 6000);
        assert_eq!(json["titles"][0]["playtimeHours"], 100.0);
        assert!(json["titles"][0]["coverImageKey"].is_null());
    }
}
