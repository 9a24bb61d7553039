//! /chunks handlers — raw and typed chunk access.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use peek_core::id::LOCAL_ID_MASK;
use peek_core::wire::{ChunkResponse, CreateChunkRequest, RemoveResponse, TypedObjectResponse};
use peek_core::LocalId;
use peek_services::ChunkStore;

use super::{not_found, parse_chunk_id, parse_data, ApiState};

// ── /chunks (POST) ────────────────────────────────────────────────────────────

pub async fn handle_create_chunk(
    State(state): State<ApiState>,
    Json(req): Json<CreateChunkRequest>,
) -> Result<Json<ChunkResponse>, (StatusCode, String)> {
    let data = parse_data(&req.data)?;
    let size = data.len();

    let id = match req.local_id {
        Some(local) if local == 0 || local > LOCAL_ID_MASK => {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("local id {} out of range", local),
            ));
        }
        Some(local) => state.store.put(LocalId::new(local), data),
        None => state.store.create(data),
    };
    tracing::debug!(chunk_id = %id, size, "chunk created");

    Ok(Json(ChunkResponse {
        chunk_id: id.to_string(),
        size,
        data: req.data.to_ascii_lowercase(),
    }))
}

// ── /chunks/{cid} (GET) ───────────────────────────────────────────────────────

pub async fn handle_get_chunk(
    State(state): State<ApiState>,
    Path(cid): Path<String>,
) -> Result<Json<ChunkResponse>, (StatusCode, String)> {
    let id = parse_chunk_id(&cid)?;
    let data = state.store.get(id).ok_or_else(|| not_found(id))?;

    Ok(Json(ChunkResponse {
        chunk_id: id.to_string(),
        size: data.len(),
        data: hex::encode(&data),
    }))
}

// ── /chunks/{cid} (DELETE) ────────────────────────────────────────────────────

pub async fn handle_remove_chunk(
    State(state): State<ApiState>,
    Path(cid): Path<String>,
) -> Result<Json<RemoveResponse>, (StatusCode, String)> {
    let id = parse_chunk_id(&cid)?;
    let removed = state.store.remove(id);
    tracing::debug!(chunk_id = %id, removed, "chunk remove");
    Ok(Json(RemoveResponse { removed }))
}

// ── /chunks/{cid}/typed/{type_name} (GET) ─────────────────────────────────────

pub async fn handle_get_typed(
    State(state): State<ApiState>,
    Path((cid, type_name)): Path<(String, String)>,
) -> Result<Json<TypedObjectResponse>, (StatusCode, String)> {
    let id = parse_chunk_id(&cid)?;
    if state.store.types().get(&type_name).is_none() {
        return Err((
            StatusCode::NOT_FOUND,
            format!("unknown type {}", type_name),
        ));
    }

    let object = state
        .store
        .fetch_typed_object(id, &type_name)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(TypedObjectResponse {
        chunk_id: id.to_string(),
        type_name: object.type_name,
        size: object.size,
        value: object.value,
    }))
}
