pub mod build;
pub mod dispatch;
pub mod list;
pub mod preview;
pub mod validate;

use anyhow::Context;
use sift_config::{IndexDefinition, SiftConfig};
use sift_index::Indexer;

/// Turn a configured definition into an indexer.
pub fn indexer_for(definition: &IndexDefinition, config: &SiftConfig) -> anyhow::Result<Indexer> {
    let indexer = Indexer::new(
        definition.extract.clone(),
        definition.captures.clone(),
        definition.layers.clone(),
    )
    .with_context(|| format!("index '{}' is not buildable", definition.name))?;
    Ok(indexer
        .with_strict(definition.strict)
        .with_threads(config.general.threads))
}
