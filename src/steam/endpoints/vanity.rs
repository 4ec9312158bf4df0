use crate::steam::client::SteamClient;
use crate::steam::types::{SteamApiResponse, VanityDto, VanityEnvelope};

impl SteamClient {
    /// Resolve a vanity name (custom profile URL) to a canonical account id.
    ///
    /// A non-matching name is not an error: the platform answers with `success != 1`.
    pub async fn resolve_vanity_url(&self, vanity: &str) -> SteamApiResponse<VanityDto> {
        let envelope: VanityEnvelope = self
            .get(
                "/ISteamUser/ResolveVanityURL/v0001/",
                &[("vanityurl", vanity)],
            )
            .await?;

        Ok(envelope.response)
    }
}
