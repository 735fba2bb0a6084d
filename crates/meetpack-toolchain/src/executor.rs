use std::path::Path;

use crate::error::ToolchainError;

/// Abstraction over child-process execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait CommandExecutor: Send + Sync {
    /// Run `program` in `cwd`, streaming its output to the terminal.
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), ToolchainError>;
}

/// Spawns real processes.
pub struct RealExecutor;

impl CommandExecutor for RealExecutor {
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), ToolchainError> {
        use std::process::Stdio;

        let status = tokio::process::Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| ToolchainError::NotFound {
                program: program.to_owned(),
                cwd: cwd.to_path_buf(),
                source: e,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ToolchainError::CommandFailed {
                program: program.to_owned(),
                args: args.to_vec(),
                status: status.to_string(),
            })
        }
    }
}
