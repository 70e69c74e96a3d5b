use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Route parameter naming a room, e.g. `kanye` in `/chat/kanye`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomUri(String);

impl RoomUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Page path for this room, with the uri percent-encoded as one segment.
    pub fn path(&self) -> String {
        format!("/chat/{}", urlencoding::encode(&self.0))
    }
}

impl fmt::Display for RoomUri {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomUri {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Owner of messages the mock accessor seeds on its own.
    pub const fn system() -> Self {
        Self(Uuid::nil())
    }

    pub fn short(&self) -> String {
        let simple = self.0.simple().to_string();
        simple[simple.len() - 6..].to_owned()
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: u64,
    pub uri: RoomUri,
    pub name: String,
    pub date: OffsetDateTime,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: u64,
    pub user_id: UserId,
    pub room: RoomUri,
    pub content: String,
    pub date: OffsetDateTime,
}

/// What the composer hands up: no id, owner or room yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialMessage {
    pub content: String,
    pub date: Option<OffsetDateTime>,
}

impl PartialMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            date: None,
        }
    }
}

/// A completed outgoing message. The accessor assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub user_id: UserId,
    pub room: RoomUri,
    pub content: String,
    pub date: OffsetDateTime,
}
