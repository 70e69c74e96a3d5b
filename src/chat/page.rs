use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    api::{ApiError, ChatApi, MockChatApi},
    identity::Identity,
    include_res,
    model::{PartialMessage, RoomUri},
    res::escape_html,
    AppResult, AppState,
};

use super::{
    controller::{ChatPage, Composed, ThreadState},
    room_list::render_room_list,
    thread::{render_composer, render_thread},
};

#[derive(Deserialize)]
pub(crate) struct ComposeForm {
    content: String,
}

#[debug_handler(state = AppState)]
pub(crate) async fn lobby(
    State(api): State<MockChatApi>,
    session: Session,
) -> AppResult<Response> {
    show(api, &session, None).await
}

#[debug_handler(state = AppState)]
pub(crate) async fn room(
    State(api): State<MockChatApi>,
    session: Session,
    Path(uri): Path<String>,
) -> AppResult<Response> {
    show(api, &session, Some(RoomUri::new(uri))).await
}

#[debug_handler(state = AppState)]
pub(crate) async fn compose_in_lobby(
    State(api): State<MockChatApi>,
    session: Session,
    Form(form): Form<ComposeForm>,
) -> AppResult<Redirect> {
    compose(api, &session, None, form).await
}

#[debug_handler(state = AppState)]
pub(crate) async fn compose_in_room(
    State(api): State<MockChatApi>,
    session: Session,
    Path(uri): Path<String>,
    Form(form): Form<ComposeForm>,
) -> AppResult<Redirect> {
    compose(api, &session, Some(RoomUri::new(uri)), form).await
}

async fn show(api: MockChatApi, session: &Session, room: Option<RoomUri>) -> AppResult<Response> {
    let identity = Identity::load_or_create(session).await?;
    let mut page = ChatPage::new(api, identity);
    page.activate(room).await;

    let status = match page.thread() {
        ThreadState::Failed { error: ApiError::RoomNotFound(_), .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::OK,
    };
    Ok((status, Html(render_page(&page))).into_response())
}

async fn compose(
    api: MockChatApi,
    session: &Session,
    room: Option<RoomUri>,
    ComposeForm { content }: ComposeForm,
) -> AppResult<Redirect> {
    let identity = Identity::load_or_create(session).await?;
    let back = match &room {
        Some(room) => room.path(),
        None => "/chat".to_owned(),
    };

    submit(api, identity, room, content).await?;
    Ok(Redirect::to(&back))
}

/// One page load followed by a compose, as the form post does it.
async fn submit<A: ChatApi>(
    api: A,
    identity: Identity,
    room: Option<RoomUri>,
    content: String,
) -> Result<Composed, ApiError> {
    let mut page = ChatPage::new(api, identity);
    page.activate(room).await;
    page.compose(PartialMessage::new(content)).await
}

pub(crate) fn render_page<A: ChatApi>(page: &ChatPage<A>) -> String {
    let title = page
        .active_room()
        .and_then(|uri| page.rooms().iter().find(|r| &r.uri == uri))
        .map_or_else(|| "roomchat".to_owned(), |r| format!("{} · roomchat", r.name));

    include_res!(str, "/pages/chat.html")
        .replace("{title}", &escape_html(&title))
        .replace("{alias}", &escape_html(page.identity().alias()))
        .replace("{room_items}", &render_room_list(page.rooms(), page.active_room()))
        .replace("{messages}", &render_thread(page.thread(), page.identity()))
        .replace("{composer}", &render_composer(page.active_room()))
}

#[cfg(test)]
mod tests {
    use crate::{
        chat::testing::{Call, ScriptedApi},
        model::UserId,
    };

    use super::*;

    fn visitor() -> Identity {
        Identity::new(UserId::new(), "Jolly Whale")
    }

    #[tokio::test]
    async fn submit_loads_the_room_before_sending() {
        let api = ScriptedApi::with_fixture();
        let identity = visitor();

        let composed = submit(api.clone(), identity.clone(), Some("kanye".into()), "hey".to_owned())
            .await
            .unwrap();

        assert_eq!(composed, Composed::Sent);
        let calls = api.calls();
        assert_eq!(calls[..2], [Call::Rooms, Call::Messages("kanye".into())]);
        let [_, _, Call::Send(sent)] = &calls[..] else {
            panic!("expected rooms, messages, send; got {calls:?}");
        };
        assert_eq!(sent.room.as_str(), "kanye");
        assert_eq!(sent.user_id, identity.user_id());
    }

    #[tokio::test]
    async fn submit_without_room_only_loads_rooms() {
        let api = ScriptedApi::with_fixture();

        let composed = submit(api.clone(), visitor(), None, "hey".to_owned()).await.unwrap();

        assert_eq!(composed, Composed::Discarded);
        assert_eq!(api.calls(), [Call::Rooms]);
    }

    #[tokio::test]
    async fn submit_to_unknown_room_reports_it() {
        let api = ScriptedApi::with_fixture();

        let err = submit(api, visitor(), Some("nowhere".into()), "hey".to_owned())
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::RoomNotFound("nowhere".into()));
    }
}
