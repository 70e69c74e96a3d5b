use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use time::OffsetDateTime;

use crate::{
    api::{ApiError, ChatApi},
    model::{Message, NewMessage, Room, RoomUri, UserId},
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Rooms,
    Messages(RoomUri),
    Send(NewMessage),
}

#[derive(Default)]
pub(crate) struct Script {
    pub(crate) calls: Vec<Call>,
    /// Order in which fetches resolved: "rooms" / "messages".
    pub(crate) arrivals: Vec<&'static str>,
    pub(crate) rooms: Vec<Room>,
    pub(crate) threads: HashMap<RoomUri, Vec<Message>>,
    pub(crate) rooms_delay: Duration,
    pub(crate) messages_delay: Duration,
    pub(crate) fail_rooms: bool,
    pub(crate) fail_messages: bool,
    pub(crate) fail_send: bool,
}

/// Records every call and answers from canned data, optionally after a delay.
#[derive(Clone, Default)]
pub(crate) struct ScriptedApi(Arc<Mutex<Script>>);

impl ScriptedApi {
    pub(crate) fn with_fixture() -> Self {
        let api = Self::default();
        {
            let mut script = api.script();
            script.rooms = vec![room(1, "all", "All"), room(2, "kanye", "Kanye West")];
            script.threads.insert("all".into(), Vec::new());
            script.threads.insert(
                "kanye".into(),
                (1..=3).map(|id| message(id, "kanye", "old")).collect(),
            );
        }
        api
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.script().calls.clone()
    }

    pub(crate) fn arrivals(&self) -> Vec<&'static str> {
        self.script().arrivals.clone()
    }

    pub(crate) fn script(&self) -> MutexGuard<'_, Script> {
        self.0.lock().unwrap()
    }

    fn record(&self, call: Call, delay: impl Fn(&Script) -> Duration) -> Duration {
        let mut script = self.script();
        script.calls.push(call);
        delay(&script)
    }
}

async fn wait(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

impl ChatApi for ScriptedApi {
    async fn fetch_chat_rooms(&self) -> Result<Vec<Room>, ApiError> {
        let delay = self.record(Call::Rooms, |s| s.rooms_delay);
        wait(delay).await;

        let mut script = self.script();
        script.arrivals.push("rooms");
        if script.fail_rooms {
            return Err(ApiError::Unavailable("rooms".to_owned()));
        }
        Ok(script.rooms.clone())
    }

    async fn fetch_chat_messages(&self, room: &RoomUri) -> Result<Vec<Message>, ApiError> {
        let delay = self.record(Call::Messages(room.clone()), |s| s.messages_delay);
        wait(delay).await;

        let mut script = self.script();
        script.arrivals.push("messages");
        if script.fail_messages {
            return Err(ApiError::Unavailable("messages".to_owned()));
        }
        script
            .threads
            .get(room)
            .cloned()
            .ok_or_else(|| ApiError::RoomNotFound(room.clone()))
    }

    async fn send_chat_message(&self, new: NewMessage) -> Result<Vec<Message>, ApiError> {
        let mut script = self.script();
        script.calls.push(Call::Send(new.clone()));
        if script.fail_send {
            return Err(ApiError::Unavailable("send".to_owned()));
        }
        let thread = script.threads.entry(new.room.clone()).or_default();
        let id = thread.len() as u64 + 1;
        thread.push(Message {
            id,
            user_id: new.user_id,
            room: new.room,
            content: new.content,
            date: new.date,
        });
        Ok(thread.clone())
    }
}

pub(crate) fn room(id: u64, uri: &str, name: &str) -> Room {
    Room {
        id,
        uri: uri.into(),
        name: name.to_owned(),
        date: OffsetDateTime::UNIX_EPOCH,
        image: None,
    }
}

pub(crate) fn message(id: u64, room: &str, content: &str) -> Message {
    Message {
        id,
        user_id: UserId::system(),
        room: room.into(),
        content: content.to_owned(),
        date: OffsetDateTime::UNIX_EPOCH,
    }
}
