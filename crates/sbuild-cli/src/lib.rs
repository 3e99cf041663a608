//! Shared infrastructure for the sbuild CLI.

pub mod logging;
