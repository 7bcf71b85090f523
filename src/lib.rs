//! Client for the policy violation endpoints of the Dependency-Track REST API.
//!
//! ```no_run
//! use dtrack_violations::{Client, HttpTransport};
//!
//! # async fn run() -> dtrack_violations::Result<()> {
//! let transport = HttpTransport::new("http://localhost:8081", "odt_xxxxxxxx")?;
//! let client = Client::new(transport);
//! let suppressed = client.all_violations(true).await?;
//! println!("{} suppressed violations", suppressed.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod render;
pub mod time;
pub mod types;
pub mod violation;

pub use client::{ApiRequest, HttpTransport};
pub use config::Config;
pub use error::{Error, Result};
pub use time::Time;
pub use types::{Policy, PolicyCondition, PolicyViolation, Project, ProjectMetrics, ViolationAnalysis};
pub use violation::{Client, DEFAULT_PAGE_SIZE};
