use std::path::{Path, PathBuf};

use meetpack_core::{RemoteScripts, SourceTree};

use crate::copy::{self, CopyError};
use crate::directive::{self, RemoteScript};

/// Source-relative directories scanned for `*.html` entry points.
pub const ENTRY_POINT_DIRS: &[&str] = &["", "static"];

/// What happened to one entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Path relative to both the source and output roots.
    pub path: PathBuf,
    pub includes_expanded: usize,
    pub remote_scripts: usize,
}

/// A template after substitution, before it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub content: String,
    pub includes_expanded: usize,
    pub remote_scripts: usize,
}

/// Materializes HTML entry points with their include directives expanded.
pub struct TemplateResolver<'a> {
    source: &'a SourceTree,
    output: &'a Path,
    remote: &'a RemoteScripts,
}

impl<'a> TemplateResolver<'a> {
    pub fn new(source: &'a SourceTree, output: &'a Path, remote: &'a RemoteScripts) -> Self {
        Self {
            source,
            output,
            remote,
        }
    }

    /// Top-level `*.html` followed by `static/*.html`, each group sorted.
    pub fn entry_points(&self) -> Result<Vec<PathBuf>, ResolveError> {
        let mut entries = Vec::new();
        for dir in ENTRY_POINT_DIRS {
            let files = copy::files_with_extension(&self.source.join(dir), "html")
                .map_err(ResolveError::ListEntryPoints)?;
            for file in files {
                let relative = copy::relative_to(&file, self.source.root())
                    .map_err(ResolveError::ListEntryPoints)?;
                entries.push(relative.to_path_buf());
            }
        }
        Ok(entries)
    }

    /// Resolve and write every entry point.
    pub fn resolve_all(&self) -> Result<Vec<RenderedPage>, ResolveError> {
        let entries = self.entry_points()?;
        let mut pages = Vec::with_capacity(entries.len());
        for entry in entries {
            pages.push(self.resolve_entry(&entry)?);
        }
        tracing::info!(pages = pages.len(), "templates resolved");
        Ok(pages)
    }

    /// Resolve one source-relative entry point into the output tree.
    pub fn resolve_entry(&self, relative: &Path) -> Result<RenderedPage, ResolveError> {
        let src = self.source.join(relative);
        let content = std::fs::read_to_string(&src).map_err(|e| ResolveError::ReadTemplate {
            path: src.clone(),
            source: e,
        })?;

        let rendered = self.render(&content, &src)?;

        let dst = self.output.join(relative);
        if let Some(parent) = dst.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ResolveError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        std::fs::write(&dst, &rendered.content).map_err(|e| ResolveError::WriteOutput {
            path: dst.clone(),
            source: e,
        })?;

        tracing::debug!(
            page = %relative.display(),
            includes = rendered.includes_expanded,
            remote = rendered.remote_scripts,
            "resolved template"
        );
        Ok(RenderedPage {
            path: relative.to_path_buf(),
            includes_expanded: rendered.includes_expanded,
            remote_scripts: rendered.remote_scripts,
        })
    }

    /// Apply remote-script substitution, then one pass of include expansion.
    ///
    /// `template` is only used to label errors.
    pub fn render(
        &self,
        content: &str,
        template: &Path,
    ) -> Result<RenderedDocument, ResolveError> {
        let mut document = content.to_owned();
        let mut remote_scripts = 0;

        // Must run before generic expansion, which would otherwise inline
        // these files.
        for script in RemoteScript::ALL {
            let Some(url) = self.remote_url(script) else {
                continue;
            };
            let (substituted, count) = directive::substitute_remote(&document, script, url);
            if count > 0 {
                document = substituted.into_owned();
                remote_scripts += count;
            }
        }

        let expansion = directive::expand_includes(&document, |virtual_path| {
            self.load_include(template, virtual_path)
        })?;

        Ok(RenderedDocument {
            content: expansion.content,
            includes_expanded: expansion.expanded,
            remote_scripts,
        })
    }

    fn remote_url(&self, script: RemoteScript) -> Option<&str> {
        match script {
            RemoteScript::Config => self.remote.config_url.as_deref(),
            RemoteScript::InterfaceConfig => self.remote.interface_config_url.as_deref(),
        }
    }

    fn load_include(&self, template: &Path, virtual_path: &str) -> Result<String, ResolveError> {
        let path = self.source.resolve_virtual(virtual_path);
        std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResolveError::IncludeNotFound {
                    template: template.to_path_buf(),
                    path,
                }
            } else {
                ResolveError::ReadInclude { path, source: e }
            }
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("failed to list HTML entry points")]
    ListEntryPoints(#[source] CopyError),
    #[error("failed to read template {path}")]
    ReadTemplate {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{template} includes {path}, which does not exist")]
    IncludeNotFound { template: PathBuf, path: PathBuf },
    #[error("failed to read included file {path}")]
    ReadInclude {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}")]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
}
