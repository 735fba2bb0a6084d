use std::path::{Path, PathBuf};

/// Subdirectories copied verbatim into the bundle.
pub const COPIED_DIRS: &[&str] = &["libs", "fonts", "images", "lang", "sounds", "static"];

/// A checked-out Jitsi Meet source tree, after the upstream build has run.
///
/// All paths handed out are rooted at the tree; nothing here writes to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTree {
    root: PathBuf,
}

impl SourceTree {
    /// Wrap `root` without checking it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Wrap `root` and check that it is a directory with a
    /// `lang/languages.json` manifest.
    pub fn open(root: impl Into<PathBuf>) -> crate::Result<Self> {
        let tree = Self::new(root);
        if !tree.root.is_dir() {
            return Err(crate::Error::SourceMissing(tree.root));
        }
        let manifest = tree.language_manifest();
        if !manifest.is_file() {
            return Err(crate::Error::ManifestMissing(manifest));
        }
        Ok(tree)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn language_manifest(&self) -> PathBuf {
        self.root.join("lang").join("languages.json")
    }

    pub fn package_lock(&self) -> PathBuf {
        self.root.join("package-lock.json")
    }

    /// Per-language country-name file from the bundled `i18n-iso-countries`
    /// dataset.
    pub fn country_locale(&self, code: &str) -> PathBuf {
        self.root
            .join("node_modules")
            .join("i18n-iso-countries")
            .join("langs")
            .join(format!("{code}.json"))
    }

    /// Resolve an include directive's virtual path.
    ///
    /// Virtual paths are always rooted at the source tree, so leading
    /// separators are dropped before joining.
    pub fn resolve_virtual(&self, virtual_path: &str) -> PathBuf {
        self.root.join(virtual_path.trim_start_matches('/'))
    }
}
