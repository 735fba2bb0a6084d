mod commands;

use clap::{Parser, Subcommand};
use commands::TargetArgs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "meetpack",
    about = "Compile the Jitsi Meet frontend to a static site"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the upstream build, then assemble the static site
    Build {
        #[command(flatten)]
        target: TargetArgs,
        /// Skip npm install, webpack and make (the tree is already built)
        #[arg(long)]
        skip_toolchain: bool,
        /// Leave package-lock.json untouched
        #[arg(long)]
        skip_lockfile_fix: bool,
    },
    /// Assemble the static site from an already-built source tree
    Assemble {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Remove integrity checksums of git dependencies from package-lock.json
    SanitizeLockfile {
        /// The path to the checked-out Jitsi Meet source code
        #[arg(long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            target,
            skip_toolchain,
            skip_lockfile_fix,
        } => commands::build(target, skip_toolchain, skip_lockfile_fix).await?,
        Commands::Assemble { target } => commands::assemble(target).await?,
        Commands::SanitizeLockfile { input } => commands::sanitize_lockfile(&input).await?,
    }

    Ok(())
}
