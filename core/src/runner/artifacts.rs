use std::path::{Path, PathBuf};

use crate::error::RunnerError;
use crate::util::encode_index;

use super::types::{RunMetadata, Task};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub transcript: PathBuf,
    pub metadata: PathBuf,
}

impl ArtifactPaths {
    /// `<outdir>/out<base5 index>_<model>.{txt,json}`
    pub fn for_task(outdir: &Path, task: &Task) -> Self {
        let stem = format!(
            "out{}_{}",
            encode_index(u64::from(task.index)),
            task.model_name
        );
        Self {
            transcript: outdir.join(format!("{stem}.txt")),
            metadata: outdir.join(format!("{stem}.json")),
        }
    }
}

pub async fn ensure_output_dir(dir: &Path) -> Result<(), RunnerError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| RunnerError::io(dir, e))
}

/// Writes the transcript (lines joined by `\n`) and then the metadata as
/// 2-space indented JSON. Existing files are overwritten.
pub async fn write_artifacts(
    paths: &ArtifactPaths,
    transcript: &[String],
    metadata: &RunMetadata,
) -> Result<(), RunnerError> {
    tokio::fs::write(&paths.transcript, transcript.join("\n"))
        .await
        .map_err(|e| RunnerError::io(&paths.transcript, e))?;

    let json = serde_json::to_string_pretty(metadata)?;
    tokio::fs::write(&paths.metadata, json)
        .await
        .map_err(|e| RunnerError::io(&paths.metadata, e))?;

    tracing::debug!(
        transcript = %paths.transcript.display(),
        metadata = %paths.metadata.display(),
        lines = transcript.len(),
        "artifacts written"
    );
    Ok(())
}
