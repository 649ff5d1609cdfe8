use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info};

use super::RankingSource;
use super::transcript::parse_transcript;
use crate::error::SourceError;
use crate::model::RankedLists;

pub const DEFAULT_JAR_PATH: &str = "InfoRetireval.jar";
pub const DEFAULT_GENERATOR_CLASS: &str = "in.ac.iiits.ir.data.GenerateRankedList";

/// Runs the Java ranking generator: `<java> -cp <jar> <class> <seed>`.
#[derive(Debug, Clone)]
pub struct JarRankingSource {
    pub java_bin: String,
    pub jar_path: PathBuf,
    pub generator_class: String,
}

impl JarRankingSource {
    pub fn new(
        java_bin: impl Into<String>,
        jar_path: impl Into<PathBuf>,
        generator_class: impl Into<String>,
    ) -> Self {
        Self {
            java_bin: java_bin.into(),
            jar_path: jar_path.into(),
            generator_class: generator_class.into(),
        }
    }

    fn command(&self, seed: &str) -> Command {
        let mut command = Command::new(&self.java_bin);
        command
            .arg("-cp")
            .arg(&self.jar_path)
            .arg(&self.generator_class)
            .arg(seed);
        command
    }
}

impl RankingSource for JarRankingSource {
    fn invoke(&self, seed: &str) -> Result<RankedLists, SourceError> {
        info!(
            java = %self.java_bin,
            jar = %self.jar_path.display(),
            class = %self.generator_class,
            seed = %seed,
            "running ranking generator"
        );

        let output = self
            .command(seed)
            .output()
            .map_err(|source| SourceError::Spawn {
                program: self.java_bin.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SourceError::NonZeroExit {
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(bytes = stdout.len(), "ranking generator finished");

        Ok(parse_transcript(&stdout)?)
    }
}
