//! Derived styling and the per-message layout rule.
//!
//! `ChatStyle` is computed from the color inputs of a [`ChatConfig`] and
//! cached in a [`StyleCache`]: frames reuse it until one of those inputs
//! changes.

use eframe::egui::{Align, Color32, CornerRadius};

use crate::config::ChatConfig;
use crate::initials::initials;
use crate::model::{ImageRef, Message, User};

/// Spacing and sizes, in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metrics {
    pub row_padding_x: f32,
    pub row_padding_y: f32,
    pub avatar_gap: f32,
    pub avatar_size: f32,
    pub bubble_padding_x: i8,
    pub bubble_padding_y: i8,
    pub bubble_radius: u8,
    /// Fraction of the row width a bubble may use.
    pub bubble_max_width: f32,
    pub message_font: f32,
    pub time_font: f32,
    pub initials_font: f32,
    pub badge_font: f32,
    pub badge_top: f32,
    pub footer_padding: f32,
    pub send_button_size: f32,
    pub action_button_size: f32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            row_padding_x: 15.0,
            row_padding_y: 5.0,
            avatar_gap: 5.0,
            avatar_size: 40.0,
            bubble_padding_x: 15,
            bubble_padding_y: 10,
            bubble_radius: 20,
            bubble_max_width: 0.8,
            message_font: 13.0,
            time_font: 10.0,
            initials_font: 12.0,
            badge_font: 12.0,
            badge_top: 4.0,
            footer_padding: 10.0,
            send_button_size: 44.0,
            action_button_size: 30.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paint {
    pub fill: Color32,
    pub text: Color32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputPaint {
    pub fill: Color32,
    pub border: Color32,
    pub text: Color32,
    pub placeholder: Color32,
}

/// Everything the renderer needs to paint one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatStyle {
    pub outgoing: Paint,
    pub incoming: Paint,
    pub outgoing_avatar: Paint,
    pub incoming_avatar: Paint,
    pub outgoing_time: Color32,
    pub incoming_time: Color32,
    pub send_button: Paint,
    pub input: InputPaint,
    pub background: Color32,
    pub badge: Paint,
    pub metrics: Metrics,
}

impl ChatStyle {
    pub fn from_config(config: &ChatConfig) -> Self {
        let theme = Paint {
            fill: config.theme_color.color32(),
            text: config.theme_text_color.color32(),
        };
        let incoming = Paint {
            fill: config.incoming_bubble_color.color32(),
            text: config.incoming_text_color.color32(),
        };
        Self {
            outgoing: theme,
            incoming,
            outgoing_avatar: theme,
            incoming_avatar: incoming,
            outgoing_time: theme.text.gamma_multiply(0.7),
            incoming_time: incoming.text.gamma_multiply(0.6),
            send_button: theme,
            input: InputPaint {
                fill: config.input_background_color.color32(),
                border: config.input_border_color.color32(),
                text: config.input_color.color32(),
                placeholder: config.placeholder_color.color32(),
            },
            background: config.background_color.color32(),
            badge: Paint {
                fill: config.badge_fill(),
                text: config.badge_text(),
            },
            metrics: Metrics::default(),
        }
    }

    /// Bubble corners: the corner nearest the avatar is square.
    pub fn bubble_corners(&self, direction: Direction) -> CornerRadius {
        let r = self.metrics.bubble_radius;
        match direction {
            Direction::Outgoing => CornerRadius {
                nw: r,
                ne: 0,
                sw: r,
                se: r,
            },
            Direction::Incoming => CornerRadius {
                nw: 0,
                ne: r,
                sw: r,
                se: r,
            },
        }
    }
}

/// The configuration inputs `ChatStyle` depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StyleKey([Color32; 11]);

impl StyleKey {
    pub fn of(config: &ChatConfig) -> Self {
        Self([
            config.theme_color.color32(),
            config.theme_text_color.color32(),
            config.incoming_bubble_color.color32(),
            config.incoming_text_color.color32(),
            config.placeholder_color.color32(),
            config.input_color.color32(),
            config.input_border_color.color32(),
            config.input_background_color.color32(),
            config.background_color.color32(),
            config.badge_fill(),
            config.badge_text(),
        ])
    }
}

/// Memoizes the last computed `ChatStyle`.
#[derive(Default)]
pub struct StyleCache {
    cached: Option<(StyleKey, ChatStyle)>,
    recomputes: usize,
}

impl StyleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, config: &ChatConfig) -> &ChatStyle {
        let key = StyleKey::of(config);
        if self.cached.as_ref().is_some_and(|(cached, _)| *cached != key) {
            self.cached = None;
        }
        let recomputes = &mut self.recomputes;
        let (_, style) = self.cached.get_or_insert_with(|| {
            *recomputes += 1;
            tracing::trace!(recomputes = *recomputes, "chat style recomputed");
            (key, ChatStyle::from_config(config))
        });
        style
    }

    /// How many times the style had to be rebuilt.
    pub fn recomputes(&self) -> usize {
        self.recomputes
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Outgoing,
    Incoming,
}

impl Direction {
    /// Horizontal alignment of the row: trailing for outgoing.
    pub fn align(self) -> Align {
        match self {
            Direction::Outgoing => Align::Max,
            Direction::Incoming => Align::Min,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AvatarContent {
    Image(ImageRef),
    Initials(String),
}

/// How one message is laid out.
#[derive(Clone, Debug, PartialEq)]
pub struct BubbleLayout {
    pub direction: Direction,
    pub bubble: Paint,
    pub time_color: Color32,
    /// `None` when the avatar for this side is turned off.
    pub avatar: Option<AvatarContent>,
    pub avatar_paint: Paint,
}

impl BubbleLayout {
    pub fn resolve(message: &Message, me: &User, config: &ChatConfig, style: &ChatStyle) -> Self {
        let direction = if message.is_outgoing(me) {
            Direction::Outgoing
        } else {
            Direction::Incoming
        };
        let (bubble, time_color, avatar_paint, show_avatar) = match direction {
            Direction::Outgoing => (
                style.outgoing,
                style.outgoing_time,
                style.outgoing_avatar,
                config.show_outgoing_avatar,
            ),
            Direction::Incoming => (
                style.incoming,
                style.incoming_time,
                style.incoming_avatar,
                config.show_incoming_avatar,
            ),
        };
        let avatar = show_avatar.then(|| avatar_content(&message.sender));
        Self {
            direction,
            bubble,
            time_color,
            avatar,
            avatar_paint,
        }
    }
}

fn avatar_content(user: &User) -> AvatarContent {
    match &user.avatar {
        Some(image) => AvatarContent::Image(image.clone()),
        None => AvatarContent::Initials(initials(&user.name).unwrap_or_else(|e| {
            tracing::warn!(user_id = user.id, error = %e, "no initials for user");
            "?".to_string()
        })),
    }
}
