mod controller;
mod page;
mod room_list;
mod thread;

#[cfg(test)]
mod testing;

use axum::{routing::get, Router};

use crate::AppState;

pub use controller::{Applied, ChatPage, Composed, FetchOutcome, Navigation, Outgoing, ThreadState};
pub use room_list::render_room_list;
pub use thread::{markdown_to_html, render_composer, render_thread};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chat", get(page::lobby).post(page::compose_in_lobby))
        .route("/chat/{uri}", get(page::room).post(page::compose_in_room))
}
