//! Shared application state.

use std::sync::Arc;

use venti_shared::time::Clock;

use crate::{
    domain::{ConnectionRegistry, MessagePusher, MessageStore, RoomDirectory},
    usecase::{
        BestEffortPersister, ConnectParticipantUseCase, DisconnectParticipantUseCase,
        GetRoomDetailUseCase, GetRoomHistoryUseCase, GetRoomsUseCase, JoinRoomUseCase,
        LeaveRoomUseCase, RelaySignalUseCase, RelayTypingUseCase, SendChatMessageUseCase,
    },
};

use super::event_router::EventRouter;

/// Shared application state
pub struct AppState {
    /// EventRouter（WebSocket イベントの振り分け）
    pub event_router: Arc<EventRouter>,
    /// GetRoomHistoryUseCase（履歴取得のユースケース）
    pub get_room_history_usecase: Arc<GetRoomHistoryUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// Largest inbound WebSocket message accepted, in bytes
    pub max_message_bytes: usize,
}

impl AppState {
    /// Wire every usecase on top of the given ports.
    ///
    /// The same registry, directory and pusher instances are shared by all
    /// usecases so every connection task sees one membership state.
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        directory: Arc<dyn RoomDirectory>,
        message_pusher: Arc<dyn MessagePusher>,
        store: Arc<dyn MessageStore>,
        clock: Arc<dyn Clock>,
        max_message_bytes: usize,
    ) -> Self {
        let event_router = EventRouter::new(
            Arc::new(ConnectParticipantUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            Arc::new(DisconnectParticipantUseCase::new(
                registry.clone(),
                directory.clone(),
                message_pusher.clone(),
            )),
            Arc::new(JoinRoomUseCase::new(
                registry.clone(),
                directory.clone(),
                message_pusher.clone(),
            )),
            Arc::new(LeaveRoomUseCase::new(
                registry.clone(),
                directory.clone(),
                message_pusher.clone(),
            )),
            Arc::new(SendChatMessageUseCase::new(
                directory.clone(),
                message_pusher.clone(),
                BestEffortPersister::new(store.clone()),
                clock,
            )),
            Arc::new(RelayTypingUseCase::new(
                registry,
                directory.clone(),
                message_pusher.clone(),
            )),
            Arc::new(RelaySignalUseCase::new(directory.clone(), message_pusher)),
        );

        Self {
            event_router: Arc::new(event_router),
            get_room_history_usecase: Arc::new(GetRoomHistoryUseCase::new(store)),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(directory.clone())),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(directory)),
            max_message_bytes,
        }
    }
}
