//! Unit tests for the nomad CLI
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod helpers;

mod orchestrator_scenarios;
