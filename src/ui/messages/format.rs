//! Message text with clickable links.

use eframe::egui::{self, Color32, FontId};
use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s]+").expect("URL regex pattern is valid"));

/// Characters that usually close a sentence rather than belong to a URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '\'', '"'];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TextSegment<'a> {
    Plain(&'a str),
    Link(&'a str),
}

/// Split message text into plain runs and URLs, in order.
pub(crate) fn split_links(text: &str) -> Vec<TextSegment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for m in URL_RE.find_iter(text) {
        let url = m.as_str().trim_end_matches(TRAILING_PUNCTUATION);
        if url.len() <= "https://".len() {
            continue;
        }
        if m.start() > cursor {
            segments.push(TextSegment::Plain(&text[cursor..m.start()]));
        }
        segments.push(TextSegment::Link(url));
        cursor = m.start() + url.len();
    }
    if cursor < text.len() {
        segments.push(TextSegment::Plain(&text[cursor..]));
    }
    segments
}

/// Render bubble text; URLs become hyperlinks in the same color, underlined.
pub(crate) fn render_message_text(ui: &mut egui::Ui, text: &str, color: Color32, size: f32) {
    let segments = split_links(text);
    let font = FontId::proportional(size);

    if let [TextSegment::Plain(plain)] = segments.as_slice() {
        ui.label(egui::RichText::new(*plain).font(font).color(color).strong());
        return;
    }

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for segment in segments {
            match segment {
                TextSegment::Plain(plain) => {
                    ui.label(
                        egui::RichText::new(plain)
                            .font(font.clone())
                            .color(color)
                            .strong(),
                    );
                }
                TextSegment::Link(url) => {
                    ui.hyperlink_to(
                        egui::RichText::new(url)
                            .font(font.clone())
                            .color(color)
                            .underline(),
                        url,
                    );
                }
            }
        }
    });
}
