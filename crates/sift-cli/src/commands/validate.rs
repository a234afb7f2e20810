use anyhow::Context;
use serde::Serialize;
use sift_index::IndexArtifact;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ValidateArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ValidateResponse {
    path: String,
    records: usize,
    layers: Vec<Vec<String>>,
    valid: bool,
}

/// Handle `sift validate <PATH>`. Needs no configuration.
pub fn handle(args: &ValidateArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let artifact = IndexArtifact::read(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    artifact
        .validate()
        .with_context(|| format!("{} is not a valid index", args.path.display()))?;

    output(
        &ValidateResponse {
            path: args.path.display().to_string(),
            records: artifact.data.len(),
            layers: artifact.metadata.layers,
            valid: true,
        },
        flags.format,
    )
}
