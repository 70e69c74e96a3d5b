use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    api::ApiError,
    identity::Identity,
    include_res,
    model::{Message, RoomUri, UserId},
    res::escape_html,
};

use super::controller::ThreadState;

const TIME: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

pub fn render_thread(thread: &ThreadState, identity: &Identity) -> String {
    match thread {
        ThreadState::Idle => r#"<p class="placeholder">Pick a room on the left.</p>"#.to_owned(),
        ThreadState::Loading(room) => format!(
            r#"<p class="placeholder">Loading #{}…</p>"#,
            escape_html(room.as_str())
        ),
        ThreadState::Loaded { messages, .. } if messages.is_empty() => {
            r#"<p class="placeholder">No messages yet. Say something.</p>"#.to_owned()
        }
        ThreadState::Loaded { messages, .. } => messages
            .iter()
            .map(|message| render_message(message, identity))
            .collect(),
        ThreadState::Failed { room, error } => {
            let reason = match error {
                ApiError::RoomNotFound(_) => "That room doesn't exist.".to_owned(),
                ApiError::Unavailable(why) => format!("Couldn't load messages: {why}"),
            };
            format!(
                r#"<p class="notice" data-room="{}">{}</p>"#,
                escape_html(room.as_str()),
                escape_html(&reason)
            )
        }
    }
}

fn render_message(message: &Message, identity: &Identity) -> String {
    let (class, author) = if message.user_id == identity.user_id() {
        ("message mine", format!("{} (you)", identity.alias()))
    } else if message.user_id == UserId::system() {
        ("message system", "roomchat".to_owned())
    } else {
        ("message", format!("user-{}", message.user_id.short()))
    };

    include_res!(str, "/pages/message.html")
        .replace("{id}", &message.id.to_string())
        .replace("{class}", class)
        .replace("{author}", &escape_html(&author))
        .replace("{time}", &message.date.format(TIME).unwrap_or_default())
        .replace("{content}", &markdown_to_html(&message.content))
}

/// Renders message content as Markdown. Raw HTML in the input comes out as
/// escaped text and link targets outside http(s)/mailto become `#`.
pub fn markdown_to_html(content: &str) -> String {
    let parser = Parser::new_ext(content, Options::ENABLE_STRIKETHROUGH).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        _ => event,
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    // browsers ignore whitespace and control characters inside a scheme
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect();

    let allowed = match cleaned.find(|c| matches!(c, ':' | '/' | '?' | '#')) {
        Some(at) if cleaned[at..].starts_with(':') => matches!(
            cleaned[..at].to_ascii_lowercase().as_str(),
            "http" | "https" | "mailto"
        ),
        _ => true,
    };

    if allowed { url } else { CowStr::Borrowed("#") }
}

/// Composer form. Posts back to the page it sits on; disabled with no room.
pub fn render_composer(active: Option<&RoomUri>) -> String {
    let (action, disabled) = match active {
        Some(room) => (room.path(), ""),
        None => ("/chat".to_owned(), " disabled"),
    };

    include_res!(str, "/pages/composer.html")
        .replace("{action}", &action)
        .replace("{disabled}", disabled)
}
