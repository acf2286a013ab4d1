//! Integration tests for the nomad CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior.
//! They never reach `lxc`: every scenario fails or finishes before the
//! first hypervisor call.

mod project_commands;
