use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    #[error("failed to start {program} in {cwd}; is it installed?")]
    NotFound {
        program: String,
        cwd: PathBuf,
        source: std::io::Error,
    },

    #[error("{program} {args:?} failed ({status})")]
    CommandFailed {
        program: String,
        args: Vec<String>,
        status: String,
    },
}
