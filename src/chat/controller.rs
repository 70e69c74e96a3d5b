use time::OffsetDateTime;

use crate::{
    api::{ApiError, ChatApi},
    identity::Identity,
    model::{Message, NewMessage, PartialMessage, Room, RoomUri},
};

#[derive(Debug, Clone, PartialEq)]
pub enum ThreadState {
    /// No room selected.
    Idle,
    Loading(RoomUri),
    Loaded { room: RoomUri, messages: Vec<Message> },
    Failed { room: RoomUri, error: ApiError },
}

/// Ticket for one navigation, keyed to the room at dispatch time.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    generation: u64,
    room: Option<RoomUri>,
}

impl Navigation {
    pub fn room(&self) -> Option<&RoomUri> {
        self.room.as_ref()
    }
}

#[derive(Debug)]
pub struct FetchOutcome {
    navigation: Navigation,
    rooms: Result<Vec<Room>, ApiError>,
    messages: Option<Result<Vec<Message>, ApiError>>,
}

/// Which slots an [`FetchOutcome`] actually wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub rooms: bool,
    pub thread: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outgoing {
    generation: u64,
    message: NewMessage,
}

impl Outgoing {
    pub fn message(&self) -> &NewMessage {
        &self.message
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composed {
    /// No room was active; nothing was sent.
    Discarded,
    Sent,
}

pub struct ChatPage<A> {
    api: A,
    identity: Identity,
    active: Option<RoomUri>,
    generation: u64,
    rooms_generation: u64,
    rooms: Vec<Room>,
    thread: ThreadState,
}

impl<A: ChatApi> ChatPage<A> {
    pub fn new(api: A, identity: Identity) -> Self {
        Self {
            api,
            identity,
            active: None,
            generation: 0,
            rooms_generation: 0,
            rooms: Vec::new(),
            thread: ThreadState::Idle,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn active_room(&self) -> Option<&RoomUri> {
        self.active.as_ref()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn thread(&self) -> &ThreadState {
        &self.thread
    }

    /// Messages of the loaded thread; empty in every other state.
    pub fn messages(&self) -> &[Message] {
        match &self.thread {
            ThreadState::Loaded { messages, .. } => messages,
            _ => &[],
        }
    }

    /// Switches the active room. Anything still in flight for an earlier
    /// navigation becomes stale.
    pub fn navigate(&mut self, room: Option<RoomUri>) -> Navigation {
        self.generation += 1;
        self.active = room.clone();
        self.thread = match &room {
            Some(room) => ThreadState::Loading(room.clone()),
            None => ThreadState::Idle,
        };
        tracing::debug!(generation = self.generation, room = ?room, "navigate");

        Navigation {
            generation: self.generation,
            room,
        }
    }

    /// One room fetch, plus one message fetch when a room is selected.
    /// The two run concurrently.
    pub async fn fetch(api: &A, navigation: Navigation) -> FetchOutcome {
        let (rooms, messages) = match &navigation.room {
            Some(room) => {
                let (rooms, messages) =
                    tokio::join!(api.fetch_chat_rooms(), api.fetch_chat_messages(room));
                (rooms, Some(messages))
            }
            None => (api.fetch_chat_rooms().await, None),
        };

        FetchOutcome {
            navigation,
            rooms,
            messages,
        }
    }

    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        let FetchOutcome {
            navigation,
            rooms,
            messages,
        } = outcome;
        let mut applied = Applied {
            rooms: false,
            thread: false,
        };

        match rooms {
            Ok(rooms) if navigation.generation >= self.rooms_generation => {
                self.rooms_generation = navigation.generation;
                self.rooms = rooms;
                applied.rooms = true;
            }
            Ok(_) => {
                tracing::debug!(generation = navigation.generation, "dropping stale room list");
            }
            Err(error) => {
                tracing::warn!(%error, "room fetch failed, keeping previous list");
            }
        }

        let (Some(room), Some(messages)) = (navigation.room, messages) else {
            return applied;
        };
        if navigation.generation != self.generation {
            tracing::debug!(
                %room,
                generation = navigation.generation,
                current = self.generation,
                "dropping stale thread"
            );
            return applied;
        }

        self.thread = match messages {
            Ok(messages) => {
                tracing::debug!(%room, count = messages.len(), "thread loaded");
                ThreadState::Loaded { room, messages }
            }
            Err(error) => {
                tracing::warn!(%room, %error, "message fetch failed");
                ThreadState::Failed { room, error }
            }
        };
        applied.thread = true;
        applied
    }

    pub async fn activate(&mut self, room: Option<RoomUri>) -> Applied {
        let navigation = self.navigate(room);
        let outcome = Self::fetch(&self.api, navigation).await;
        self.apply(outcome)
    }

    /// Completes `partial` for the active room. `None` when no room is
    /// active, in which case the page is left untouched.
    pub fn prepare_send(&self, partial: PartialMessage) -> Option<Outgoing> {
        let room = self.active.clone()?;
        Some(Outgoing {
            generation: self.generation,
            message: NewMessage {
                user_id: self.identity.user_id(),
                room,
                content: partial.content,
                date: partial.date.unwrap_or_else(OffsetDateTime::now_utc),
            },
        })
    }

    /// Replaces the thread with whatever the send accessor returned.
    pub fn finish_send(
        &mut self,
        outgoing: Outgoing,
        result: Result<Vec<Message>, ApiError>,
    ) -> Result<(), ApiError> {
        let Outgoing {
            generation,
            message,
        } = outgoing;

        let messages = result.inspect_err(|error| {
            tracing::warn!(room = %message.room, %error, "send failed");
        })?;

        if generation != self.generation {
            tracing::debug!(room = %message.room, "dropping thread from stale send");
            return Ok(());
        }

        self.thread = ThreadState::Loaded {
            room: message.room,
            messages,
        };
        Ok(())
    }

    pub async fn compose(&mut self, partial: PartialMessage) -> Result<Composed, ApiError> {
        let Some(outgoing) = self.prepare_send(partial) else {
            tracing::debug!("compose without an active room, ignoring");
            return Ok(Composed::Discarded);
        };

        let result = self.api.send_chat_message(outgoing.message().clone()).await;
        self.finish_send(outgoing, result)?;
        Ok(Composed::Sent)
    }
}
