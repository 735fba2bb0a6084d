use meetpack_core::lockfile;
use meetpack_toolchain::Toolchain;

use super::TargetArgs;

/// Run the full pipeline: lockfile fix → npm/webpack/make → assemble.
pub async fn build(
    args: TargetArgs,
    skip_toolchain: bool,
    skip_lockfile_fix: bool,
) -> anyhow::Result<()> {
    let (bundle, config) = super::load_settings(args)?;

    // Checked up front so a stale bundle fails fast instead of after the build.
    if bundle.output.exists() {
        anyhow::bail!(
            "output directory {} already exists; remove it or choose another path",
            bundle.output.display()
        );
    }

    if skip_lockfile_fix {
        println!("Skipping package-lock.json fix");
    } else if lockfile::strip_git_integrity(&bundle.source)? {
        println!("Removed git dependency checksums from package-lock.json");
    }

    if skip_toolchain {
        println!("Skipping upstream build");
    } else {
        println!("Building {}...", bundle.source.root().display());
        Toolchain::new(&config.toolchain, &bundle.source)
            .run_all()
            .await?;
    }

    super::assemble::run(&bundle)
}
