//! Integration tests for the jhub CLI
//!
//! These tests spawn the actual binary. Full deployments run against
//! stand-in `az` and `ssh` scripts, so they are Unix-only.

mod cli_tests;
