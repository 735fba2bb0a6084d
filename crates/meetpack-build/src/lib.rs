//! Static bundle assembly for a built Jitsi Meet source tree.
//!
//! # Pipeline
//!
//! ```text
//! meetpack assemble
//!   1. Check      ── source has lang/languages.json, output does not exist
//!   2. Collect    ── libs/ fonts/ images/ lang/ sounds/ static/, renamed files,
//!                    countries-{code}.json, css/*.css
//!   3. Resolve    ── *.html + static/*.html with includes expanded
//! ```
//!
//! # Include directives
//!
//! `<!--#include virtual="/path"-->` is replaced by the file at
//! `<source>/path`, one level deep. When a remote URL is configured,
//! `<script><!--#include virtual="/config.js"--></script>` (and likewise
//! `interface_config.js`) becomes `<script src="URL"></script>` instead.

pub mod collector;
pub mod copy;
pub mod directive;
pub mod resolver;

use std::path::PathBuf;

use meetpack_core::{BundleConfig, SourceTree};

pub use collector::{AssetCollector, CollectError, CollectReport};
pub use resolver::{RenderedPage, ResolveError, TemplateResolver};

/// Everything one assembly run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    pub assets: CollectReport,
    pub pages: Vec<RenderedPage>,
}

/// Build the bundle described by `config` into a fresh output directory.
///
/// Fails before writing anything if the source tree is invalid or the
/// output path already exists. Later failures leave the partial output in
/// place.
pub fn assemble(config: &BundleConfig) -> Result<AssemblyReport, AssembleError> {
    let source = SourceTree::open(config.source.root())?;
    let output = &config.output;

    if output.exists() {
        return Err(AssembleError::OutputExists(output.clone()));
    }
    std::fs::create_dir(output).map_err(|e| AssembleError::CreateOutput {
        path: output.clone(),
        source: e,
    })?;

    tracing::info!(
        source = %source.root().display(),
        output = %output.display(),
        "assembling bundle"
    );

    let assets = AssetCollector::new(&source, output).collect()?;
    let pages = TemplateResolver::new(&source, output, &config.remote).resolve_all()?;

    Ok(AssemblyReport { assets, pages })
}

#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    #[error("output directory {0} already exists; remove it or choose another path")]
    OutputExists(PathBuf),
    #[error("failed to create output directory {path}")]
    CreateOutput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid source tree")]
    Source(#[from] meetpack_core::Error),
    #[error("failed to collect assets")]
    Collect(#[from] CollectError),
    #[error("failed to resolve templates")]
    Resolve(#[from] ResolveError),
}
