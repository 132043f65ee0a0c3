//! Router construction for the `/health` and `/metrics` endpoints.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

// Layer 3: Internal module imports
use crate::cluster::ClusterStore;
use crate::reminder::ReminderTable;
use crate::state::StateStore;
use crate::system::Silo;
use crate::transport::Transport;

/// State handed to the diagnostics router: a clone of the silo handle being observed.
pub struct DiagnosticsState<C, R, S, Tr> {
    silo: Silo<C, R, S, Tr>,
}

impl<C, R, S, Tr> Clone for DiagnosticsState<C, R, S, Tr> {
    fn clone(&self) -> Self {
        Self { silo: self.silo.clone() }
    }
}

/// Build an axum [`Router`] exposing `/health` and `/metrics` for `silo`.
///
/// The caller is responsible for binding a listener and serving the router (e.g. via
/// `axum::serve`); this crate only constructs the routes, it does not own the HTTP server
/// lifecycle.
pub fn build_router<C, R, S, Tr>(silo: Silo<C, R, S, Tr>) -> Router
where
    C: ClusterStore + 'static,
    R: ReminderTable + 'static,
    S: StateStore + 'static,
    Tr: Transport + 'static,
{
    let state = DiagnosticsState { silo };
    Router::new()
        .route("/health", get(health::<C, R, S, Tr>))
        .route("/metrics", get(metrics::<C, R, S, Tr>))
        .with_state(state)
}

async fn health<C, R, S, Tr>(State(state): State<DiagnosticsState<C, R, S, Tr>>) -> Json<Value>
where
    C: ClusterStore + 'static,
    R: ReminderTable + 'static,
    S: StateStore + 'static,
    Tr: Transport + 'static,
{
    Json(json!({
        "status": "healthy",
        "silo_id": state.silo.id().as_str(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn metrics<C, R, S, Tr>(State(state): State<DiagnosticsState<C, R, S, Tr>>) -> Json<Value>
where
    C: ClusterStore + 'static,
    R: ReminderTable + 'static,
    S: StateStore + 'static,
    Tr: Transport + 'static,
{
    let members = state.silo.cluster().members().await;

    Json(json!({
        "silo_id": state.silo.id().as_str(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "active_actors": state.silo.active_actor_count(),
        "dead_letters_queued": state.silo.dlq().len(),
        "cluster_members": members.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::InMemoryClusterStore;
    use crate::reminder::InMemoryReminderTable;
    use crate::state::InMemoryStateStore;
    use crate::system::SiloConfig;
    use crate::transport::InProcessTransport;
    use crate::util::SiloId;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_silo() -> Silo<InMemoryClusterStore, InMemoryReminderTable, InMemoryStateStore, InProcessTransport> {
        Silo::new(
            SiloConfig::default(),
            SiloId::new("silo-diag"),
            Arc::new(InMemoryClusterStore::new()),
            Arc::new(InMemoryReminderTable::new()),
            Arc::new(InMemoryStateStore::new()),
            Arc::new(InProcessTransport::new()),
        )
    }

    #[tokio::test]
    async fn test_health_endpoint_returns_ok() {
        let router = build_router(test_silo());
        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_metrics_endpoint_reports_zero_actors_initially() {
        let router = build_router(test_silo());
        let response = router
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
