//! Unit tests for the jhub CLI
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod azure_cli;
mod ssh_client;
