mod mock;

use std::future::Future;

use thiserror::Error;

use crate::model::{Message, NewMessage, Room, RoomUri};

pub use mock::MockChatApi;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("room {0} does not exist")]
    RoomNotFound(RoomUri),

    #[error("chat backend unavailable: {0}")]
    Unavailable(String),
}

pub trait ChatApi: Send + Sync {
    fn fetch_chat_rooms(&self) -> impl Future<Output = Result<Vec<Room>, ApiError>> + Send;

    fn fetch_chat_messages(
        &self,
        room: &RoomUri,
    ) -> impl Future<Output = Result<Vec<Message>, ApiError>> + Send;

    /// Appends `message` to its room and returns the whole updated thread.
    fn send_chat_message(
        &self,
        message: NewMessage,
    ) -> impl Future<Output = Result<Vec<Message>, ApiError>> + Send;
}
