use directories::ProjectDirs;
use eframe::egui::Color32;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ChatError, Result};

pub const DEFAULT_PLACEHOLDER: &str = "Write Your Message...";
pub const CONFIG_FILE: &str = "chat.json";

/// A color as written in configuration: `#rgb`, `#rrggbb`, `#rrggbbaa`
/// or one of a few CSS names. Serialized back as hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorValue(pub Color32);

impl ColorValue {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Color32::from_rgb(r, g, b))
    }

    pub fn color32(self) -> Color32 {
        self.0
    }
}

impl From<Color32> for ColorValue {
    fn from(color: Color32) -> Self {
        Self(color)
    }
}

impl FromStr for ColorValue {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self> {
        static HEX_RE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
                .expect("hex color pattern is valid")
        });

        let s = s.trim();
        if let Some(caps) = HEX_RE.captures(s) {
            let hex = &caps[1];
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
            let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map(|n| n * 17);
            let parsed = match hex.len() {
                3 => (nibble(0), nibble(1), nibble(2), Ok(255)),
                6 => (byte(0), byte(2), byte(4), Ok(255)),
                _ => (byte(0), byte(2), byte(4), byte(6)),
            };
            return match parsed {
                (Ok(r), Ok(g), Ok(b), Ok(a)) => {
                    Ok(Self(Color32::from_rgba_unmultiplied(r, g, b, a)))
                }
                _ => Err(ChatError::InvalidColor(s.to_string())),
            };
        }

        named_color(s)
            .map(Self)
            .ok_or_else(|| ChatError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for ColorValue {
    type Error = ChatError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ColorValue> for String {
    fn from(value: ColorValue) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0.to_srgba_unmultiplied();
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

fn named_color(name: &str) -> Option<Color32> {
    let color = match name.to_ascii_lowercase().as_str() {
        "white" => Color32::WHITE,
        "black" => Color32::BLACK,
        "gray" | "grey" => Color32::from_rgb(128, 128, 128),
        "lightgray" | "lightgrey" => Color32::from_rgb(211, 211, 211),
        "silver" => Color32::from_rgb(192, 192, 192),
        "red" => Color32::from_rgb(255, 0, 0),
        "green" => Color32::from_rgb(0, 128, 0),
        "blue" => Color32::from_rgb(0, 0, 255),
        "yellow" => Color32::from_rgb(255, 255, 0),
        "orange" => Color32::from_rgb(255, 165, 0),
        "purple" => Color32::from_rgb(128, 0, 128),
        "transparent" => Color32::TRANSPARENT,
        _ => return None,
    };
    Some(color)
}

/// Construction-time options for the chat widget.
///
/// Field names are snake_case; camelCase names are accepted when
/// deserializing. `senderContainerColor` and `senderMessageColor` map to the
/// `incoming_*` fields, since they style the other party's bubble.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Outgoing bubble fill, send button and own avatar background.
    #[serde(alias = "themeColor")]
    pub theme_color: ColorValue,
    /// Text on outgoing bubbles and the send button glyph.
    #[serde(alias = "themeTextColor")]
    pub theme_text_color: ColorValue,

    #[serde(default = "defaults::incoming_bubble", alias = "senderContainerColor")]
    pub incoming_bubble_color: ColorValue,
    #[serde(default = "defaults::incoming_text", alias = "senderMessageColor")]
    pub incoming_text_color: ColorValue,

    #[serde(default = "defaults::yes", alias = "showSenderAvatar")]
    pub show_outgoing_avatar: bool,
    #[serde(default = "defaults::yes", alias = "showReceiverAvatar")]
    pub show_incoming_avatar: bool,

    #[serde(default = "defaults::placeholder")]
    pub placeholder: String,
    #[serde(default = "defaults::gray", alias = "placeholderColor")]
    pub placeholder_color: ColorValue,
    #[serde(default = "defaults::black", alias = "inputColor")]
    pub input_color: ColorValue,
    #[serde(default = "defaults::gray", alias = "inputBorderColor")]
    pub input_border_color: ColorValue,
    #[serde(default = "defaults::white", alias = "inputBackgroundColor")]
    pub input_background_color: ColorValue,

    #[serde(default = "defaults::white", alias = "backgroundColor")]
    pub background_color: ColorValue,
    /// Image URI painted behind the list, replacing the fill.
    #[serde(default, alias = "backgroundImage")]
    pub background_image: Option<String>,

    #[serde(default, alias = "showEmoji")]
    pub show_emoji: bool,
    #[serde(default, alias = "showAttachment")]
    pub show_attachment: bool,

    /// Date badge fill; theme color when unset.
    #[serde(default, alias = "timeContainerColor")]
    pub time_container_color: Option<ColorValue>,
    /// Date badge text; theme text color when unset.
    #[serde(default, alias = "timeContainerTextColor")]
    pub time_container_text_color: Option<ColorValue>,
}

mod defaults {
    use super::ColorValue;

    pub fn incoming_bubble() -> ColorValue {
        ColorValue::rgb(0xf0, 0xeb, 0xfb)
    }
    pub fn incoming_text() -> ColorValue {
        ColorValue::rgb(0, 0, 0)
    }
    pub fn gray() -> ColorValue {
        ColorValue::rgb(128, 128, 128)
    }
    pub fn black() -> ColorValue {
        ColorValue::rgb(0, 0, 0)
    }
    pub fn white() -> ColorValue {
        ColorValue::rgb(255, 255, 255)
    }
    pub fn yes() -> bool {
        true
    }
    pub fn placeholder() -> String {
        super::DEFAULT_PLACEHOLDER.to_string()
    }
}

impl ChatConfig {
    pub fn new(
        theme_color: impl Into<ColorValue>,
        theme_text_color: impl Into<ColorValue>,
    ) -> Self {
        Self {
            theme_color: theme_color.into(),
            theme_text_color: theme_text_color.into(),
            incoming_bubble_color: defaults::incoming_bubble(),
            incoming_text_color: defaults::incoming_text(),
            show_outgoing_avatar: true,
            show_incoming_avatar: true,
            placeholder: defaults::placeholder(),
            placeholder_color: defaults::gray(),
            input_color: defaults::black(),
            input_border_color: defaults::gray(),
            input_background_color: defaults::white(),
            background_color: defaults::white(),
            background_image: None,
            show_emoji: false,
            show_attachment: false,
            time_container_color: None,
            time_container_text_color: None,
        }
    }

    pub fn badge_fill(&self) -> Color32 {
        self.time_container_color.unwrap_or(self.theme_color).color32()
    }

    pub fn badge_text(&self) -> Color32 {
        self.time_container_text_color
            .unwrap_or(self.theme_text_color)
            .color32()
    }
}

/// Location of the demo's persisted chat configuration.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "bubblechat", "bubblechat")
        .map(|proj| proj.config_dir().join(CONFIG_FILE))
}

pub fn load_config(path: &Path) -> Result<ChatConfig> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_config(path: &Path, config: &ChatConfig) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let data = serde_json::to_string_pretty(config)?;
    fs::write(path, data)?;
    Ok(())
}
