use std::path::{Path, PathBuf};

use meetpack_core::source::COPIED_DIRS;
use meetpack_core::{LanguageManifest, SourceTree};

use crate::copy::{self, CopyError};

/// A single renamed file in the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMapping {
    pub src: &'static str,
    pub dst: &'static str,
    /// Absent sources are skipped instead of failing the run.
    pub optional: bool,
}

/// Individually copied files, source-relative to output-relative.
pub const FILE_MAPPINGS: &[FileMapping] = &[
    FileMapping {
        src: "resources/robots.txt",
        dst: "robots.txt",
        optional: false,
    },
    FileMapping {
        src: "libs/external_api.min.js",
        dst: "external_api.js",
        optional: false,
    },
    FileMapping {
        src: "pwa-worker.js",
        dst: "pwa-worker.js",
        optional: true,
    },
];

/// Counts of what the collector wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectReport {
    pub directories: usize,
    pub tree_files: usize,
    pub single_files: usize,
    pub country_locales: Vec<String>,
    pub css_files: usize,
}

/// Copies the non-HTML part of the bundle from the source tree.
pub struct AssetCollector<'a> {
    source: &'a SourceTree,
    output: &'a Path,
}

impl<'a> AssetCollector<'a> {
    pub fn new(source: &'a SourceTree, output: &'a Path) -> Self {
        Self { source, output }
    }

    /// Run every copy step. The output root must already exist.
    pub fn collect(&self) -> Result<CollectReport, CollectError> {
        let mut report = CollectReport::default();

        for name in COPIED_DIRS {
            report.tree_files += self.copy_directory_tree(name)?;
            report.directories += 1;
        }

        for mapping in FILE_MAPPINGS {
            if self.copy_single_file(mapping)? {
                report.single_files += 1;
            }
        }

        report.country_locales = self.copy_country_locales()?;
        report.css_files = self.copy_css()?;

        tracing::info!(
            directories = report.directories,
            files = report.tree_files + report.single_files + report.css_files,
            country_locales = report.country_locales.len(),
            "assets collected"
        );
        Ok(report)
    }

    /// Recursively copy `name` from the source tree to the same name in the
    /// output. Returns the number of files copied.
    pub fn copy_directory_tree(&self, name: &str) -> Result<usize, CollectError> {
        let copied = copy::copy_tree(&self.source.join(name), &self.output.join(name))?;
        tracing::debug!(dir = name, files = copied, "copied directory");
        Ok(copied)
    }

    /// Copy one renamed file. Returns `false` when an optional source is
    /// absent.
    pub fn copy_single_file(&self, mapping: &FileMapping) -> Result<bool, CollectError> {
        let src = self.source.join(mapping.src);
        if mapping.optional && !src.is_file() {
            tracing::debug!(path = %src.display(), "optional file absent, skipping");
            return Ok(false);
        }
        copy::copy_file(&src, &self.output.join(mapping.dst))?;
        Ok(true)
    }

    /// Copy `countries-{code}.json` for every manifest language that has a
    /// country-name translation. Returns the codes copied.
    pub fn copy_country_locales(&self) -> Result<Vec<String>, CollectError> {
        let manifest = LanguageManifest::load(&self.source.language_manifest())?;
        let lang_dir = self.output.join("lang");

        let mut copied = Vec::new();
        for code in manifest.codes() {
            let src = self.source.country_locale(code);
            if !src.is_file() {
                tracing::debug!(code, "no country names for language, skipping");
                continue;
            }
            copy::copy_file(&src, &lang_dir.join(country_locale_name(code)))?;
            copied.push(code.to_owned());
        }
        Ok(copied)
    }

    /// Flat copy of `css/*.css`. Returns the number of files copied.
    pub fn copy_css(&self) -> Result<usize, CollectError> {
        let dst_dir = self.output.join("css");
        std::fs::create_dir(&dst_dir).map_err(|e| CopyError::CreateDir {
            path: dst_dir.clone(),
            source: e,
        })?;

        let src_dir = self.source.join("css");
        let files = copy::files_with_extension(&src_dir, "css")?;
        for src in &files {
            copy::copy_file(src, &dst_dir.join(copy::relative_to(src, &src_dir)?))?;
        }
        Ok(files.len())
    }
}

/// Output file name for a language's country-name translations.
pub fn country_locale_name(code: &str) -> PathBuf {
    PathBuf::from(format!("countries-{code}.json"))
}

#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error(transparent)]
    Copy(#[from] CopyError),
    #[error(transparent)]
    Manifest(#[from] meetpack_core::Error),
}
