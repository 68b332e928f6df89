//! CLI module for buildr - command-line interface and output helpers.

pub mod commands;

pub use commands::{Cli, Commands};

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::ralph::RunResult;

/// Write a run's final output and extracted artifacts under `dir`.
///
/// The full final text goes to `build_output.md`; each artifact becomes its
/// own file. Returns the paths written.
pub fn write_artifacts(dir: &Path, result: &RunResult) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();

    let output_path = dir.join("build_output.md");
    fs::write(&output_path, &result.final_code)?;
    written.push(output_path);

    for artifact in &result.artifacts {
        let path = dir.join(format!("{}.txt", artifact.name));
        fs::write(&path, &artifact.content)?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Artifact;

    fn sample_result() -> RunResult {
        RunResult {
            completed: true,
            iterations_run: 2,
            app_name: "TodoApp".to_string(),
            final_code: "final text".to_string(),
            artifacts: vec![
                Artifact {
                    name: "code_block_1".to_string(),
                    content: "let a = 1;\n".to_string(),
                },
                Artifact {
                    name: "code_block_2".to_string(),
                    content: "let b = 2;\n".to_string(),
                },
            ],
            records: Vec::new(),
        }
    }

    #[test]
    fn test_write_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("todo-app");

        let written = write_artifacts(&target, &sample_result()).unwrap();

        assert_eq!(written.len(), 3);
        assert_eq!(
            fs::read_to_string(target.join("build_output.md")).unwrap(),
            "final text"
        );
        assert_eq!(
            fs::read_to_string(target.join("code_block_1.txt")).unwrap(),
            "let a = 1;\n"
        );
        assert_eq!(
            fs::read_to_string(target.join("code_block_2.txt")).unwrap(),
            "let b = 2;\n"
        );
    }

    #[test]
    fn test_write_artifacts_empty_run() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("empty");

        let mut result = sample_result();
        result.artifacts.clear();
        result.final_code.clear();

        let written = write_artifacts(&target, &result).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(
            fs::read_to_string(target.join("build_output.md")).unwrap(),
            ""
        );
    }
}
