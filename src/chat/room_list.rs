use crate::{
    include_res,
    model::{Room, RoomUri},
    res::escape_html,
};

/// Sidebar links, one per room, in the order given.
pub fn render_room_list(rooms: &[Room], active: Option<&RoomUri>) -> String {
    let mut items = String::new();
    for room in rooms {
        let class = if Some(&room.uri) == active { "room active" } else { "room" };
        let image = match &room.image {
            Some(src) if !src.is_empty() => {
                format!(r#"<img class="avatar" src="{}" alt="">"#, escape_html(src))
            }
            _ => String::new(),
        };

        items += &include_res!(str, "/pages/room_item.html")
            .replace("{class}", class)
            .replace("{path}", &room.uri.path())
            .replace("{image}", &image)
            .replace("{name}", &escape_html(&room.name));
    }
    items
}
