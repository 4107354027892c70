//! UseCase layer.
//!
//! Each usecase owns `Arc`s of the domain ports it needs and is shared by
//! every connection task. Fan-out scope comes from [`RoomEvent::fan_out`];
//! the targets are resolved against the Room Directory at the moment the
//! event is handled.
//!
//! [`RoomEvent::fan_out`]: crate::domain::RoomEvent::fan_out

mod connect_participant;
mod disconnect_participant;
mod error;
mod fan_out;
mod get_room_detail;
mod get_room_history;
mod get_rooms;
mod join_room;
mod leave_room;
mod persist_message;
mod relay_signal;
mod relay_typing;
mod send_message;

#[cfg(test)]
pub(crate) mod test_support;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{
    DisconnectError, GetRoomDetailError, HistoryError, JoinRoomError, LeaveRoomError,
};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_room_history::{GetRoomHistoryUseCase, HISTORY_LIMIT};
pub use get_rooms::GetRoomsUseCase;
pub use join_room::{JoinOutcome, JoinRoomUseCase};
pub use leave_room::LeaveRoomUseCase;
pub use persist_message::BestEffortPersister;
pub use relay_signal::RelaySignalUseCase;
pub use relay_typing::RelayTypingUseCase;
pub use send_message::{ChatDelivery, NewChatMessage, SendChatMessageUseCase};
