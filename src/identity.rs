use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::{model::UserId, session::IDENTITY, AppResult};

const ADJECTIVES: [&str; 25] = [
    "Quick", "Lazy", "Mysterious", "Jolly", "Brave", "Silent", "Witty", "Fierce",
    "Clever", "Gentle", "Wild", "Calm", "Bold", "Shy", "Proud", "Happy", "Sad",
    "Eager", "Fancy", "Rusty", "Golden", "Silver", "Bright", "Dark", "Lucky",
];

const NOUNS: [&str; 24] = [
    "Fox", "Bear", "Eagle", "Wolf", "Dragon", "Tiger", "Lion", "Owl", "Rabbit",
    "Falcon", "Hawk", "Shark", "Panda", "Kitten", "Puppy", "Phoenix", "Griffin",
    "Unicorn", "Turtle", "Dolphin", "Whale", "Elephant", "Giraffe", "Zebra",
];

/// Who is looking at the page. Handed to the controller by value; nothing
/// below the handler can change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    user_id: UserId,
    alias: String,
}

impl Identity {
    pub fn new(user_id: UserId, alias: impl Into<String>) -> Self {
        Self {
            user_id,
            alias: alias.into(),
        }
    }

    /// A fresh visitor with a random "Adjective Noun" alias.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let alias = format!(
            "{} {}",
            ADJECTIVES.choose(&mut rng).copied().unwrap_or("Nameless"),
            NOUNS.choose(&mut rng).copied().unwrap_or("User"),
        );
        Self::new(UserId::new(), alias)
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Reads the identity stored in `session`, creating one on first visit.
    pub async fn load_or_create(session: &Session) -> AppResult<Self> {
        if let Some(identity) = session.get::<Identity>(IDENTITY).await? {
            return Ok(identity);
        }

        let identity = Self::generate();
        tracing::info!(user_id = %identity.user_id, alias = %identity.alias, "new visitor");
        session.insert(IDENTITY, &identity).await?;
        Ok(identity)
    }
}
