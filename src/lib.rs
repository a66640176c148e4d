//! scanbridge - HTTP bridge for a SANE-compatible document scanner
//!
//! A small service that turns a command-line capture tool into two HTTP
//! endpoints:
//!
//! - `POST /scan` - run one capture and store the image under a
//!   timestamped name
//! - `GET /images/{filename}` - download a stored scan as an attachment
//!
//! Plus `GET /` for service info and `GET /health` for liveness.
//!
//! The capture command, resolution, format, and color mode are all
//! configuration; a simulated mode copies a fixture image instead of
//! touching hardware, which is also how the integration tests run.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use scanbridge::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     scanbridge::start_server(config).await?;
//!     Ok(())
//! }
//! ```

pub mod capture;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use capture::{CaptureConfig, CaptureError, CaptureMode, OutputFormat, ScanArtifact};
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
