//! HTTP diagnostics surface: `/health` liveness and `/metrics` JSON snapshot.
//!
//! Gated behind the `http-diagnostics` feature. Grounded on the teacher pack's own
//! axum-based health handler shape (JSON body, per-subsystem checks, `chrono::Utc::now`
//! timestamp) generalized from a single database health check to this crate's own
//! subsystems (actor host, DLQ, cluster membership).

pub mod server;

pub use server::{build_router, DiagnosticsState};
