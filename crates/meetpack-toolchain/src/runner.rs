use std::path::Path;

use meetpack_core::{SourceTree, ToolchainConfig};

use crate::error::ToolchainError;
use crate::executor::{CommandExecutor, RealExecutor};

/// Drives the upstream build, parameterized over the executor for testability.
pub struct Toolchain<'a, E: CommandExecutor = RealExecutor> {
    executor: E,
    config: &'a ToolchainConfig,
    source: &'a SourceTree,
}

impl<'a> Toolchain<'a, RealExecutor> {
    pub fn new(config: &'a ToolchainConfig, source: &'a SourceTree) -> Self {
        Self::with_executor(RealExecutor, config, source)
    }
}

impl<'a, E: CommandExecutor> Toolchain<'a, E> {
    pub fn with_executor(executor: E, config: &'a ToolchainConfig, source: &'a SourceTree) -> Self {
        Self {
            executor,
            config,
            source,
        }
    }

    /// Install → bundle → deploy.
    pub async fn run_all(&self) -> Result<(), ToolchainError> {
        self.install().await?;
        self.bundle().await?;
        self.deploy().await
    }

    pub async fn install(&self) -> Result<(), ToolchainError> {
        tracing::info!(npm = %self.config.npm, "installing npm dependencies");
        self.run(
            &self.config.npm,
            args(["--loglevel=error", "install", "--no-audit", "--no-fund"]),
        )
        .await
    }

    /// Production webpack build. Older webpack versions reject `-p`, so a
    /// failure is retried once without it.
    pub async fn bundle(&self) -> Result<(), ToolchainError> {
        let webpack = self.webpack();
        tracing::info!(webpack = %webpack, "bundling");
        match self.run(&webpack, args(["-p"])).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::warn!(error = %e, "webpack -p failed, re-running without -p");
                self.run(&webpack, Vec::new()).await
            }
        }
    }

    /// Relative multi-component paths are anchored at the source tree.
    fn webpack(&self) -> String {
        let path = Path::new(&self.config.webpack);
        if path.is_relative() && path.components().count() > 1 {
            self.source.join(path).display().to_string()
        } else {
            self.config.webpack.clone()
        }
    }

    pub async fn deploy(&self) -> Result<(), ToolchainError> {
        tracing::info!(targets = ?self.config.make_targets, "staging bundles");
        self.run(&self.config.make, self.config.make_targets.clone())
            .await
    }

    async fn run(&self, program: &str, args: Vec<String>) -> Result<(), ToolchainError> {
        tracing::debug!(program, ?args, cwd = %self.source.root().display(), "running");
        self.executor.run(program, &args, self.source.root()).await
    }
}

fn args<const N: usize>(items: [&str; N]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}
