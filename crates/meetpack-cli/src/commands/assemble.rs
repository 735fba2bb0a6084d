use meetpack_build::AssemblyReport;
use meetpack_core::BundleConfig;

use super::TargetArgs;

/// Assemble the static site from an already-built source tree.
pub async fn assemble(args: TargetArgs) -> anyhow::Result<()> {
    let (bundle, _) = super::load_settings(args)?;
    run(&bundle)
}

/// Shared tail of `build` and `assemble`.
pub(crate) fn run(bundle: &BundleConfig) -> anyhow::Result<()> {
    println!("Assembling {}...", bundle.output.display());
    println!(
        "  config.js:           {}",
        describe_remote(bundle.remote.config_url.as_deref())
    );
    println!(
        "  interface_config.js: {}",
        describe_remote(bundle.remote.interface_config_url.as_deref())
    );

    let report = meetpack_build::assemble(bundle)?;
    print_summary(&report);
    Ok(())
}

fn describe_remote(url: Option<&str>) -> String {
    match url {
        Some(url) => format!("loaded from {url}"),
        None => "baked in".to_owned(),
    }
}

fn print_summary(report: &AssemblyReport) {
    let assets = &report.assets;
    println!();
    println!(
        "Copied {} directories ({} files), {} single files, {} stylesheets",
        assets.directories, assets.tree_files, assets.single_files, assets.css_files
    );
    if assets.country_locales.is_empty() {
        println!("No country-name translations found");
    } else {
        println!(
            "Country names: {}",
            assets.country_locales.join(", ")
        );
    }
    let includes: usize = report.pages.iter().map(|p| p.includes_expanded).sum();
    println!(
        "Rendered {} pages ({} includes expanded)",
        report.pages.len(),
        includes
    );
}
