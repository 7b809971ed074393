//! Bubble chat widget for egui.
//!
//! A scrollable message list with sender/receiver bubbles, avatars with an
//! initials fallback, a composer footer and a floating date badge shown
//! while scrolling. The host application owns the messages; the widget
//! reports new outgoing text through a [`ChatHandler`].

pub mod clock;
pub mod composer;
pub mod config;
pub mod date_badge;
pub mod date_format;
pub mod error;
pub mod handler;
pub mod initials;
pub mod logging;
pub mod model;
pub mod ui;

mod integration_tests;

pub use config::{ChatConfig, ColorValue};
pub use date_badge::{BadgeState, DateBadge};
pub use date_format::{format_badge_date, format_message_time, parse_timestamp};
pub use error::{ChatError, Result};
pub use handler::{ChatCallbacks, ChatEvent, ChatHandler};
pub use initials::initials;
pub use model::{ImageRef, Message, User};
pub use ui::ChatView;
