use anyhow::Context;
use serde::Serialize;
use sift_config::{IndexDefinition, SiftConfig};
use sift_index::Source;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::BuildArgs;
use crate::commands::indexer_for;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct BuildResponse {
    index: String,
    documents: usize,
    output: String,
    written: bool,
}

/// Handle `sift build [NAMES...]`.
pub fn handle(args: &BuildArgs, config: &SiftConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let definitions = config.select(&args.names)?;
    if definitions.is_empty() {
        anyhow::bail!("no indexes configured; add an [[index]] table to sift.toml");
    }

    let mut responses = Vec::with_capacity(definitions.len());
    for definition in definitions {
        responses.push(build_one(definition, config, args.dry_run)?);
    }
    output(&responses, flags.format)
}

fn build_one(
    definition: &IndexDefinition,
    config: &SiftConfig,
    dry_run: bool,
) -> anyhow::Result<BuildResponse> {
    let indexer = indexer_for(definition, config)?;
    let source = definition.source_dir();
    let documents = Source::directory(&source, &definition.extension)
        .load()
        .with_context(|| format!("failed to read corpus {}", source.display()))?;
    tracing::info!(index = %definition.name, documents = documents.len(), "building index");

    let progress = Progress::bar(
        u64::try_from(documents.len()).unwrap_or(u64::MAX),
        &definition.name,
    );
    let artifact = match indexer.build(&documents, |_| progress.inc(1)) {
        Ok(artifact) => artifact,
        Err(error) => {
            progress.finish_err("failed");
            return Err(error).with_context(|| format!("index '{}' failed", definition.name));
        }
    };
    progress.finish_ok("built");

    let path = definition.output_path();
    if !dry_run {
        artifact
            .write(&path, config.general.pretty)
            .with_context(|| format!("failed to write index '{}'", definition.name))?;
    }

    Ok(BuildResponse {
        index: definition.name.clone(),
        documents: artifact.data.len(),
        output: path.display().to_string(),
        written: !dry_run,
    })
}
