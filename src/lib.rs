pub mod api;
pub mod appresult;
pub mod chat;
pub mod config;
pub mod identity;
pub mod model;
pub mod res;
pub mod session;

use axum::{extract::FromRef, response::Redirect, routing::get, Router};
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

pub use appresult::{AppError, AppResult};
pub use config::Config;

use api::MockChatApi;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub api: MockChatApi,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            api: MockChatApi::new(config.mock_latency),
        }
    }
}

pub fn app(state: AppState, config: &Config) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(config.session_inactivity));

    Router::new()
        .route("/", get(|| async { Redirect::to("/chat") }))
        .route("/res/chat.css", get(res::stylesheet))
        .merge(chat::router())
        .with_state(state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}
