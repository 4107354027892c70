//! UseCase: ルーム詳細取得

use std::sync::Arc;

use crate::domain::{RoomDirectory, RoomId, RoomSummary};

use super::error::GetRoomDetailError;

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    directory: Arc<dyn RoomDirectory>,
}

impl GetRoomDetailUseCase {
    pub fn new(directory: Arc<dyn RoomDirectory>) -> Self {
        Self { directory }
    }

    pub async fn execute(&self, room_id: &RoomId) -> Result<RoomSummary, GetRoomDetailError> {
        if !self.directory.room_exists(room_id).await {
            return Err(GetRoomDetailError::RoomNotFound);
        }
        let mut members = self.directory.members(room_id).await;
        members.sort();
        Ok(RoomSummary {
            room_id: room_id.clone(),
            members,
        })
    }
}
