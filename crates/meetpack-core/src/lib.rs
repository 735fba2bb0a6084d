//! Core types and configuration for meetpack.
//!
//! This crate defines the `meetpack.toml` schema ([`MeetpackConfig`]), the
//! immutable per-run [`BundleConfig`], the source tree layout
//! ([`SourceTree`]), the language manifest, the lockfile sanitizer, and
//! shared error types.

pub mod config;
pub mod error;
pub mod lockfile;
pub mod manifest;
pub mod source;

pub use config::{BundleConfig, MeetpackConfig, RemoteConfig, RemoteScripts, ToolchainConfig};
pub use error::{Error, Result};
pub use manifest::LanguageManifest;
pub use source::SourceTree;
