//! Message list rendering: bubbles, avatars, link-aware text.

mod format;
mod render;

pub(crate) use render::render_message_list;
