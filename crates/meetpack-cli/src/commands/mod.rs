mod assemble;
mod build;
mod sanitize;

use std::path::{Path, PathBuf};

use meetpack_core::{BundleConfig, MeetpackConfig, RemoteScripts, SourceTree};

pub use assemble::assemble;
pub use build::build;
pub use sanitize::sanitize_lockfile;

/// Source, destination and script-URL flags shared by `build` and `assemble`.
#[derive(clap::Args)]
pub struct TargetArgs {
    /// The path to the checked-out Jitsi Meet source code
    #[arg(long)]
    pub input: PathBuf,
    /// The destination directory for the static site (must not exist yet)
    #[arg(long)]
    pub output: PathBuf,
    /// A config.js URL, if it should be loaded dynamically rather than baked in
    #[arg(long)]
    pub config_url: Option<String>,
    /// An interface_config.js URL, if it should be loaded dynamically rather than baked in
    #[arg(long)]
    pub interface_config_url: Option<String>,
    /// An AVStack stack name, shortcut for --config-url and --interface-config-url
    #[arg(long)]
    pub stack: Option<String>,
}

/// Merge flags with meetpack.toml from the working directory.
pub(crate) fn load_settings(args: TargetArgs) -> anyhow::Result<(BundleConfig, MeetpackConfig)> {
    let config = MeetpackConfig::load(Path::new("."))?;
    let explicit = RemoteScripts {
        config_url: args.config_url,
        interface_config_url: args.interface_config_url,
    };
    let remote = RemoteScripts::resolve(explicit, args.stack.as_deref(), &config.remote);
    tracing::debug!(?remote, "resolved remote scripts");
    let bundle = BundleConfig::new(SourceTree::new(args.input), args.output, remote);
    Ok((bundle, config))
}
