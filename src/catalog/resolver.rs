use std::sync::Arc;

use tracing::debug;

use crate::steam::{AccountId, SteamApi, SteamApiResponse};

/// Turns a user handle into a canonical account id.
#[derive(Debug, Clone)]
pub struct Resolver {
    api: Arc<dyn SteamApi>,
}

impl Resolver {
    pub fn new(api: Arc<dyn SteamApi>) -> Self {
        Self { api }
    }

    /// Resolve `handle` (already trimmed and non-empty).
    ///
    /// A successful vanity match wins over the literal-id fallback. `Ok(None)` means
    /// the platform was asked and nothing matched.
    pub async fn resolve(&self, handle: &str) -> SteamApiResponse<Option<AccountId>> {
        let vanity = self.api.resolve_vanity_url(handle).await?;

        if let Some(id) = vanity.resolved_id() {
            debug!(handle, account_id = %id, "🔎 Vanity name resolved");
            return Ok(Some(id));
        }

        if AccountId::is_canonical_shape(handle) {
            debug!(handle, "🔎 Using handle as a literal account id");
            return Ok(AccountId::new(handle));
        }

        debug!(
            handle,
            message = vanity.message.as_deref().unwrap_or_default(),
            "🔎 No account matched"
        );
        Ok(None)
    }
}
