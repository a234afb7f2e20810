use anyhow::Context;
use sift_config::SiftConfig;
use sift_index::walk::document_key;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PreviewArgs;
use crate::commands::indexer_for;
use crate::output::output;

/// Handle `sift preview --index <NAME> <FILE>`.
///
/// Runs the per-document pipeline only; nothing is validated or written.
pub fn handle(args: &PreviewArgs, config: &SiftConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let definition = config.index(&args.index)?;
    let indexer = indexer_for(definition, config)?;

    let content = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let key = document_key(&definition.source_dir(), &args.file);
    let record = indexer.process(&key, &content)?;
    output(&record, flags.format)
}
