use std::path::Path;

use meetpack_core::{SourceTree, ToolchainConfig};
use meetpack_toolchain::executor::CommandExecutor;
use meetpack_toolchain::{Toolchain, ToolchainError};
use mockall::Sequence;
use mockall::mock;

mock! {
    Executor {}

    impl CommandExecutor for Executor {
        async fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), ToolchainError>;
    }
}

fn failed(program: &str) -> ToolchainError {
    ToolchainError::CommandFailed {
        program: program.to_owned(),
        args: Vec::new(),
        status: "exit status: 1".to_owned(),
    }
}

fn source() -> SourceTree {
    SourceTree::new("/work/jitsi-meet")
}

// ── Install ──

#[tokio::test]
async fn install_runs_npm_in_source_tree() {
    let mut mock = MockExecutor::new();
    mock.expect_run()
        .withf(|program, args, cwd| {
            program == "npm"
                && args == ["--loglevel=error", "install", "--no-audit", "--no-fund"]
                && cwd == Path::new("/work/jitsi-meet")
        })
        .times(1)
        .returning(|_, _, _| Ok(()));

    let config = ToolchainConfig::default();
    let source = source();
    let toolchain = Toolchain::with_executor(mock, &config, &source);

    toolchain.install().await.unwrap();
}

#[tokio::test]
async fn install_failure_propagates() {
    let mut mock = MockExecutor::new();
    mock.expect_run().returning(|_, _, _| Err(failed("npm")));

    let config = ToolchainConfig::default();
    let source = source();
    let toolchain = Toolchain::with_executor(mock, &config, &source);

    let err = toolchain.install().await.unwrap_err();
    assert!(matches!(err, ToolchainError::CommandFailed { .. }));
}

// ── Bundle ──

#[tokio::test]
async fn bundle_uses_production_flag() {
    let mut mock = MockExecutor::new();
    mock.expect_run()
        .withf(|program, args, _| {
            program == "/work/jitsi-meet/./node_modules/.bin/webpack" && args == ["-p"]
        })
        .times(1)
        .returning(|_, _, _| Ok(()));

    let config = ToolchainConfig::default();
    let source = source();
    let toolchain = Toolchain::with_executor(mock, &config, &source);

    toolchain.bundle().await.unwrap();
}

#[tokio::test]
async fn bundle_retries_without_production_flag() {
    let mut mock = MockExecutor::new();
    let mut seq = Sequence::new();
    mock.expect_run()
        .withf(|_, args, _| args == ["-p"])
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Err(failed("webpack")));
    mock.expect_run()
        .withf(|_, args, _| args.is_empty())
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(()));

    let config = ToolchainConfig::default();
    let source = source();
    let toolchain = Toolchain::with_executor(mock, &config, &source);

    toolchain.bundle().await.unwrap();
}

#[tokio::test]
async fn bundle_fails_when_retry_fails() {
    let mut mock = MockExecutor::new();
    mock.expect_run()
        .times(2)
        .returning(|_, _, _| Err(failed("webpack")));

    let config = ToolchainConfig::default();
    let source = source();
    let toolchain = Toolchain::with_executor(mock, &config, &source);

    assert!(toolchain.bundle().await.is_err());
}

#[tokio::test]
async fn bare_webpack_command_is_not_anchored() {
    let mut mock = MockExecutor::new();
    mock.expect_run()
        .withf(|program, _, _| program == "webpack")
        .times(1)
        .returning(|_, _, _| Ok(()));

    let config = ToolchainConfig {
        webpack: "webpack".to_owned(),
        ..Default::default()
    };
    let source = source();
    let toolchain = Toolchain::with_executor(mock, &config, &source);

    toolchain.bundle().await.unwrap();
}

// ── Deploy ──

#[tokio::test]
async fn deploy_passes_configured_targets_to_make() {
    let mut mock = MockExecutor::new();
    mock.expect_run()
        .withf(|program, args, _| program == "gmake" && args == ["deploy-init", "deploy-css"])
        .times(1)
        .returning(|_, _, _| Ok(()));

    let config = ToolchainConfig {
        make: "gmake".to_owned(),
        make_targets: vec!["deploy-init".to_owned(), "deploy-css".to_owned()],
        ..Default::default()
    };
    let source = source();
    let toolchain = Toolchain::with_executor(mock, &config, &source);

    toolchain.deploy().await.unwrap();
}

// ── Full run ──

#[tokio::test]
async fn run_all_executes_steps_in_order() {
    let mut mock = MockExecutor::new();
    let mut seq = Sequence::new();
    mock.expect_run()
        .withf(|program, _, _| program == "npm")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(()));
    mock.expect_run()
        .withf(|program, _, _| program.ends_with("webpack"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(()));
    mock.expect_run()
        .withf(|program, args, _| program == "make" && args.len() == 9)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(()));

    let config = ToolchainConfig::default();
    let source = source();
    let toolchain = Toolchain::with_executor(mock, &config, &source);

    toolchain.run_all().await.unwrap();
}

#[tokio::test]
async fn run_all_stops_at_first_failure() {
    let mut mock = MockExecutor::new();
    mock.expect_run()
        .withf(|program, _, _| program == "npm")
        .times(1)
        .returning(|_, _, _| Err(failed("npm")));

    let config = ToolchainConfig::default();
    let source = source();
    let toolchain = Toolchain::with_executor(mock, &config, &source);

    assert!(toolchain.run_all().await.is_err());
}
