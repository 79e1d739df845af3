//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod azure;
pub mod config;
pub mod error;
pub mod report;
pub mod ssh;
pub mod workspace;

pub use azure::{DiskRequest, ExtensionRequest, ResourceGroup, ServicePrincipal, VmRequest};
pub use config::{DeployConfig, VmProfile, validate_cluster_name};
pub use error::ProvisionError;
pub use report::ProvisionReport;
pub use ssh::SshTarget;
pub use workspace::WorkspaceLayout;
