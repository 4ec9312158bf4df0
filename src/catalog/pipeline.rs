use std::fmt;

use thiserror::Error;
use tracing::{error, info};

use crate::steam::{AccountId, SteamApiError};

use super::aggregator::Aggregator;
use super::resolver::Resolver;
use super::types::RankedCatalog;

/// Which upstream call of the pipeline failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolution,
    CatalogFetch,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Resolution => "resolution",
            Stage::CatalogFetch => "catalog_fetch",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Resolution => f.write_str("resolution"),
            Stage::CatalogFetch => f.write_str("catalog fetch"),
        }
    }
}

/// Every way the pipeline can fail short of a ranked catalog.
///
/// An empty catalog is not one of them.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("A handle must be provided")]
    InvalidInput,

    #[error("No account found for handle {handle}")]
    UserNotFound { handle: String },

    #[error("{stage} failed: {source}")]
    Upstream {
        stage: Stage,
        #[source]
        source: SteamApiError,
    },
}

impl PipelineError {
    fn upstream(stage: Stage, source: SteamApiError) -> Self {
        error!(stage = stage.as_str(), error = %source, "🛰️ ❌ Upstream call failed");
        PipelineError::Upstream { stage, source }
    }
}

/// Resolver then aggregator, strictly in that order.
#[derive(Debug, Clone)]
pub struct Pipeline {
    resolver: Resolver,
    aggregator: Aggregator,
}

impl Pipeline {
    pub fn new(resolver: Resolver, aggregator: Aggregator) -> Self {
        Self {
            resolver,
            aggregator,
        }
    }

    /// Validate and resolve a raw handle.
    pub async fn resolve(&self, handle: &str) -> Result<AccountId, PipelineError> {
        let handle = handle.trim();
        if handle.is_empty() {
            return Err(PipelineError::InvalidInput);
        }

        self.resolver
            .resolve(handle)
            .await
            .map_err(|e| PipelineError::upstream(Stage::Resolution, e))?
            .ok_or_else(|| PipelineError::UserNotFound {
                handle: handle.to_string(),
            })
    }

    pub async fn fetch_catalog(
        &self,
        account_id: &AccountId,
    ) -> Result<RankedCatalog, PipelineError> {
        self.aggregator
            .fetch_catalog(account_id)
            .await
            .map_err(|e| PipelineError::upstream(Stage::CatalogFetch, e))
    }

    /// Resolve `handle` and fetch the ranked catalog of the resolved account.
    pub async fn resolve_and_fetch(&self, handle: &str) -> Result<RankedCatalog, PipelineError> {
        let account_id = self.resolve(handle).await?;
        let catalog = self.fetch_catalog(&account_id).await?;

        info!(
            account_id = %account_id,
            titles = catalog.len(),
            "📚 ✅ Catalog ready"
        );
        Ok(catalog)
    }
}
