//! /status and /types handlers.

use axum::extract::State;
use axum::Json;

use peek_core::wire::{StatusResponse, TypesResponse};

use super::ApiState;

// ── /status ──────────────────────────────────────────────────────────────────

pub async fn handle_status(State(state): State<ApiState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        node_id: state.store.node_id().get(),
        chunks: state.store.count(),
        bytes: state.store.size(),
        types: state.store.types().names(),
    })
}

// ── /types ───────────────────────────────────────────────────────────────────

pub async fn handle_types(State(state): State<ApiState>) -> Json<TypesResponse> {
    Json(TypesResponse {
        types: state.store.types().layouts(),
    })
}
