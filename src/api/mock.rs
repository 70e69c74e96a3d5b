use std::{collections::HashMap, sync::Arc, time::Duration};

use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::model::{Message, NewMessage, Room, RoomUri, UserId};

use super::{ApiError, ChatApi};

/// In-memory stand-in for the chat backend.
///
/// Clones share the same rooms and threads.
#[derive(Clone)]
pub struct MockChatApi {
    rooms: Arc<Vec<Room>>,
    threads: Arc<Mutex<HashMap<RoomUri, Vec<Message>>>>,
    latency: Duration,
}

impl MockChatApi {
    pub fn new(latency: Duration) -> Self {
        let now = OffsetDateTime::now_utc();
        let rooms = vec![
            Room {
                id: 1,
                uri: "all".into(),
                name: "All".to_owned(),
                date: now,
                image: None,
            },
            Room {
                id: 2,
                uri: "kanye".into(),
                name: "Kanye West".to_owned(),
                date: now,
                image: None,
            },
        ];

        let threads = rooms
            .iter()
            .map(|room| {
                let welcome = Message {
                    id: 1,
                    user_id: UserId::system(),
                    room: room.uri.clone(),
                    content: format!("Welcome to **{}**.", room.name),
                    date: now,
                };
                (room.uri.clone(), vec![welcome])
            })
            .collect();

        Self {
            rooms: Arc::new(rooms),
            threads: Arc::new(Mutex::new(threads)),
            latency,
        }
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for MockChatApi {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl ChatApi for MockChatApi {
    async fn fetch_chat_rooms(&self) -> Result<Vec<Room>, ApiError> {
        self.delay().await;
        Ok(self.rooms.to_vec())
    }

    async fn fetch_chat_messages(&self, room: &RoomUri) -> Result<Vec<Message>, ApiError> {
        self.delay().await;
        self.threads
            .lock()
            .await
            .get(room)
            .cloned()
            .ok_or_else(|| ApiError::RoomNotFound(room.clone()))
    }

    async fn send_chat_message(&self, message: NewMessage) -> Result<Vec<Message>, ApiError> {
        self.delay().await;
        let mut threads = self.threads.lock().await;
        let Some(thread) = threads.get_mut(&message.room) else {
            return Err(ApiError::RoomNotFound(message.room));
        };

        // ids are assigned here, under the lock, never by the caller
        let id = thread.last().map_or(0, |m| m.id) + 1;
        tracing::debug!(room = %message.room, id, "mock: appending message");
        thread.push(Message {
            id,
            user_id: message.user_id,
            room: message.room,
            content: message.content,
            date: message.date,
        });

        Ok(thread.clone())
    }
}
