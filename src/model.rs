//! Host-owned chat data: users and messages.
//!
//! The widget only ever borrows these. Construction of new messages
//! (id, timestamp, sender) is the host's job.

use chrono::{DateTime, Utc};
use eframe::egui::TextureId;
use serde::{Deserialize, Serialize};

/// Image shown for an avatar or behind the message list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ImageRef {
    /// Any URI understood by the image loaders the host installed
    /// (`https://…`, `file://…`, `bytes://…`).
    Uri(String),
    /// A texture the host already uploaded.
    #[serde(skip)]
    Texture(TextureId),
}

impl From<&str> for ImageRef {
    fn from(uri: &str) -> Self {
        ImageRef::Uri(uri.to_string())
    }
}

impl From<String> for ImageRef {
    fn from(uri: String) -> Self {
        ImageRef::Uri(uri)
    }
}

/// A chat participant. Identity is the numeric `id`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<ImageRef>,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: None,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<ImageRef>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

/// A single chat message, immutable once created by the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub sender: User,
}

impl Message {
    pub fn new(id: i64, text: impl Into<String>, created_at: DateTime<Utc>, sender: User) -> Self {
        Self {
            id,
            text: text.into(),
            created_at,
            sender,
        }
    }

    /// True when `current` wrote this message.
    pub fn is_outgoing(&self, current: &User) -> bool {
        self.sender.id == current.id
    }
}
