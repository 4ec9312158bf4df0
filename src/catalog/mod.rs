//! Handle resolution, catalog retrieval and ranking.

pub mod aggregator;
pub mod pipeline;
pub mod resolver;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::Aggregator;
pub use pipeline::{Pipeline, PipelineError, Stage};
pub use resolver::Resolver;
pub use types::{OwnedTitle, RankedCatalog};
