use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    // ── Source tree ──
    #[error("source tree {0} does not exist or is not a directory")]
    SourceMissing(PathBuf),

    #[error("language manifest not found at {0}")]
    ManifestMissing(PathBuf),

    #[error("failed to read language manifest {path}")]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse language manifest {path}")]
    ManifestParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    // ── package-lock.json ──
    #[error("failed to read lockfile {path}")]
    LockfileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse lockfile {path}")]
    LockfileParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write lockfile {path}")]
    LockfileWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}
