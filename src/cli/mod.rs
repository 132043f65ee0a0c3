//! Operator-facing CLI for inspecting and exercising a meshforge silo.
//!
//! Gated behind the `cli` feature and built as the `meshforge-cli` binary. Commands default to
//! an entirely in-memory cluster/state/reminder/transport stack, since this binary is a
//! reference tool for local development rather than a client for a deployed cluster (there is
//! no networked `Transport` implementation in this crate to talk to one).

pub mod commands;
pub mod error;

pub use error::{CliError, Result};
