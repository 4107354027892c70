//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomId,
    infrastructure::dto::http::{
        ErrorDto, HealthDto, HistoryMessageDto, RoomDetailDto, RoomSummaryDto,
    },
    ui::state::AppState,
    usecase::GetRoomDetailError,
};

type ErrorResponse = (StatusCode, Json<ErrorDto>);

fn error_response(status: StatusCode, message: &str) -> ErrorResponse {
    (
        status,
        Json(ErrorDto {
            error: message.to_string(),
        }),
    )
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    let persistence = if state.get_room_history_usecase.persistence_enabled() {
        "enabled"
    } else {
        "disabled"
    };
    Json(HealthDto {
        status: "ok".to_string(),
        persistence: persistence.to_string(),
    })
}

/// Persisted chat history of a room, oldest first
pub async fn get_room_history(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<HistoryMessageDto>>, ErrorResponse> {
    let room_id = RoomId::try_from(room_id).map_err(|e| {
        tracing::debug!("Rejected history request: {}", e);
        error_response(StatusCode::BAD_REQUEST, "Invalid room id")
    })?;

    match state.get_room_history_usecase.execute(&room_id).await {
        Ok(messages) => Ok(Json(
            messages.into_iter().map(HistoryMessageDto::from).collect(),
        )),
        Err(e) => {
            tracing::error!("History query for room '{}' failed: {}", room_id, e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch messages",
            ))
        }
    }
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;
    Json(rooms.iter().map(RoomSummaryDto::from).collect())
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room_id = RoomId::try_from(room_id).map_err(|_| StatusCode::NOT_FOUND)?;
    match state.get_room_detail_usecase.execute(&room_id).await {
        Ok(room) => Ok(Json(RoomDetailDto::from(room))),
        Err(GetRoomDetailError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
    }
}
