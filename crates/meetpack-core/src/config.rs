use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::SourceTree;

/// File name of the optional project configuration.
pub const CONFIG_FILE: &str = "meetpack.toml";

/// meetpack.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeetpackConfig {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub toolchain: ToolchainConfig,
}

/// Where `config.js` and `interface_config.js` are loaded from at runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Hosted stack name, shortcut for both URLs
    pub stack: Option<String>,
    /// External config.js URL
    pub config_url: Option<String>,
    /// External interface_config.js URL
    pub interface_config_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// npm executable
    #[serde(default = "default_npm")]
    pub npm: String,
    /// webpack executable, relative to the source tree
    #[serde(default = "default_webpack")]
    pub webpack: String,
    /// make executable
    #[serde(default = "default_make")]
    pub make: String,
    /// Makefile targets that stage the compiled bundles into the source tree
    #[serde(default = "default_make_targets")]
    pub make_targets: Vec<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            npm: default_npm(),
            webpack: default_webpack(),
            make: default_make(),
            make_targets: default_make_targets(),
        }
    }
}

impl MeetpackConfig {
    /// Load from meetpack.toml in the given directory, or return defaults if not found.
    pub fn load(dir: &Path) -> crate::Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            Ok(Self::default())
        }
    }
}

/// External script URLs that replace inlining of the two config includes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteScripts {
    pub config_url: Option<String>,
    pub interface_config_url: Option<String>,
}

impl RemoteScripts {
    /// URL template for a hosted stack's scripts.
    pub fn stack_url(stack: &str, script: &str) -> String {
        format!("https://{stack}.onavstack.net/{script}.js")
    }

    /// Both URLs derived from a stack name.
    pub fn from_stack(stack: &str) -> Self {
        Self {
            config_url: Some(Self::stack_url(stack, "config")),
            interface_config_url: Some(Self::stack_url(stack, "interface_config")),
        }
    }

    /// Fill whichever URL is still unset from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            config_url: self.config_url.or(fallback.config_url),
            interface_config_url: self.interface_config_url.or(fallback.interface_config_url),
        }
    }

    /// Merge command-line values with the `[remote]` table.
    ///
    /// Per URL, the first set value wins: explicit flag, explicit config
    /// entry, `--stack`, then `[remote].stack`.
    pub fn resolve(
        explicit: RemoteScripts,
        stack: Option<&str>,
        remote: &RemoteConfig,
    ) -> Self {
        let configured = RemoteScripts {
            config_url: remote.config_url.clone(),
            interface_config_url: remote.interface_config_url.clone(),
        };
        let mut resolved = explicit.or(configured);
        if let Some(stack) = stack.or(remote.stack.as_deref()) {
            resolved = resolved.or(Self::from_stack(stack));
        }
        resolved
    }
}

/// Immutable settings for one assembly run.
#[derive(Debug, Clone)]
pub struct BundleConfig {
    pub source: SourceTree,
    pub output: PathBuf,
    pub remote: RemoteScripts,
}

impl BundleConfig {
    pub fn new(source: SourceTree, output: impl Into<PathBuf>, remote: RemoteScripts) -> Self {
        Self {
            source,
            output: output.into(),
            remote,
        }
    }
}

fn default_npm() -> String {
    "npm".to_owned()
}

fn default_webpack() -> String {
    "./node_modules/.bin/webpack".to_owned()
}

fn default_make() -> String {
    "make".to_owned()
}

fn default_make_targets() -> Vec<String> {
    [
        "deploy-init",
        "deploy-appbundle",
        "deploy-rnnoise-binary",
        "deploy-tflite",
        "deploy-meet-models",
        "deploy-lib-jitsi-meet",
        "deploy-libflac",
        "deploy-olm",
        "deploy-css",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}
