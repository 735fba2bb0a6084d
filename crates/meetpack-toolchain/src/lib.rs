//! Upstream build toolchain for a Jitsi Meet checkout.
//!
//! ```text
//! 1. Install  ── npm install
//! 2. Bundle   ── webpack -p, retried without -p on failure
//! 3. Deploy   ── make deploy-* (stages bundles into libs/ and css/)
//! ```

pub mod error;
pub mod executor;
pub mod runner;

pub use error::ToolchainError;
pub use executor::{CommandExecutor, RealExecutor};
pub use runner::Toolchain;
