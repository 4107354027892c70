//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{RoomDirectory, RoomSummary};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    directory: Arc<dyn RoomDirectory>,
}

impl GetRoomsUseCase {
    pub fn new(directory: Arc<dyn RoomDirectory>) -> Self {
        Self { directory }
    }

    /// Every live room, sorted by id.
    pub async fn execute(&self) -> Vec<RoomSummary> {
        self.directory.rooms().await
    }
}
