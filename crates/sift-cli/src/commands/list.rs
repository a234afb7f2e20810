use serde::Serialize;
use sift_config::SiftConfig;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct IndexSummary {
    name: String,
    source: String,
    extension: String,
    output: String,
    strict: bool,
    extract: usize,
    captures: Vec<String>,
    layers: Vec<Vec<String>>,
}

/// Handle `sift list`.
pub fn handle(config: &SiftConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let summaries: Vec<IndexSummary> = config
        .indexes
        .iter()
        .map(|index| IndexSummary {
            name: index.name.clone(),
            source: index.source_dir().display().to_string(),
            extension: index.extension.clone(),
            output: index.output_path().display().to_string(),
            strict: index.strict,
            extract: index.extract.len(),
            captures: index.captures.iter().map(|c| c.name.clone()).collect(),
            layers: index.effective_layers(),
        })
        .collect();
    output(&summaries, flags.format)
}
