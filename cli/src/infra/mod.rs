//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, the `az`
//! and OpenSSH adapters, filesystem access, and profile loading.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod azure;
pub mod command_runner;
pub mod config;
pub mod fs;
pub mod ssh;
