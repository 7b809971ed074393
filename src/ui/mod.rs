//! egui rendering for the chat widget.
//!
//! - `chat_view`: the widget itself, composing the pieces below
//! - `messages`: message rows, bubbles and link-aware text
//! - `avatar`: image or initials avatars
//! - `composer`: the text field footer
//! - `date_badge`: floating date pill
//! - `scroll`: scroll gesture detection
//! - `style`: derived colors and the per-message layout rule

mod avatar;
mod chat_view;
pub(crate) mod composer;
mod date_badge;
mod messages;
pub mod scroll;
pub mod style;

pub use avatar::render_avatar;
pub use chat_view::ChatView;
