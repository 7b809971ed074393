//! Message rows: avatar plus bubble, aligned by direction.

use eframe::egui::{self, Align, Color32, Layout};

use crate::config::ChatConfig;
use crate::date_format::format_message_time;
use crate::model::{Message, User};
use crate::ui::avatar::render_avatar;
use crate::ui::style::{BubbleLayout, ChatStyle};

use super::format::render_message_text;

/// What the list learned while rendering.
pub(crate) struct ListOutput {
    /// Index of the first message whose row reaches into the viewport.
    pub topmost: Option<usize>,
    /// Height taken by the rows, without the bottom-anchoring spacer.
    pub rows_height: f32,
}

/// Render every message, oldest first.
pub(crate) fn render_message_list(
    ui: &mut egui::Ui,
    messages: &[Message],
    me: &User,
    config: &ChatConfig,
    style: &ChatStyle,
) -> ListOutput {
    let viewport_top = ui.clip_rect().top();
    let start_y = ui.cursor().top();
    let mut topmost = None;

    for (index, message) in messages.iter().enumerate() {
        let layout = BubbleLayout::resolve(message, me, config, style);
        let row = render_message_row(ui, message, &layout, style);
        if topmost.is_none() && row.rect.bottom() > viewport_top {
            topmost = Some(index);
        }
    }

    ListOutput {
        topmost,
        rows_height: ui.cursor().top() - start_y,
    }
}

/// One row: `[avatar] bubble` for incoming, `bubble [avatar]` for outgoing.
pub(crate) fn render_message_row(
    ui: &mut egui::Ui,
    message: &Message,
    layout: &BubbleLayout,
    style: &ChatStyle,
) -> egui::Response {
    let m = &style.metrics;
    // Laying out from the aligned edge puts the avatar first either way.
    let row_layout = match layout.direction.align() {
        Align::Max => Layout::right_to_left(Align::TOP),
        _ => Layout::left_to_right(Align::TOP),
    };

    ui.add_space(m.row_padding_y);
    let row = ui.with_layout(row_layout, |ui| {
        ui.add_space(m.row_padding_x);
        ui.spacing_mut().item_spacing.x = m.avatar_gap;

        if let Some(avatar) = &layout.avatar {
            render_avatar(ui, avatar, layout.avatar_paint, m.avatar_size, m.initials_font);
        }

        let max_width = (ui.available_width() - m.row_padding_x) * m.bubble_max_width;
        render_bubble(ui, message, layout, style, max_width.max(m.avatar_size));
    });
    ui.add_space(m.row_padding_y);
    row.response
}

fn render_bubble(
    ui: &mut egui::Ui,
    message: &Message,
    layout: &BubbleLayout,
    style: &ChatStyle,
    max_width: f32,
) -> egui::Response {
    let m = &style.metrics;
    egui::Frame::new()
        .fill(layout.bubble.fill)
        .corner_radius(style.bubble_corners(layout.direction))
        .inner_margin(egui::Margin::symmetric(m.bubble_padding_x, m.bubble_padding_y))
        .shadow(egui::Shadow {
            offset: [0, 1],
            blur: 2,
            spread: 0,
            color: Color32::from_black_alpha(20),
        })
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.set_max_width(max_width);
                render_message_text(ui, &message.text, layout.bubble.text, m.message_font);
                ui.label(
                    egui::RichText::new(format_message_time(&message.created_at))
                        .size(m.time_font)
                        .color(layout.time_color),
                );
            });
        })
        .response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColorValue;
    use chrono::{Duration, TimeZone, Utc};

    fn conversation() -> (User, Vec<Message>) {
        let me = User::new(1, "John Smith");
        let ada = User::new(2, "Ada Lovelace");
        let start = Utc.with_ymd_and_hms(2024, 6, 17, 9, 0, 0).unwrap();
        let messages = (0..6)
            .map(|i| {
                let sender = if i % 2 == 0 { me.clone() } else { ada.clone() };
                Message::new(i, format!("message number {i}"), start + Duration::minutes(i), sender)
            })
            .collect();
        (me, messages)
    }

    #[test]
    fn test_list_reports_topmost_and_height() {
        let (me, messages) = conversation();
        let config = ChatConfig::new(ColorValue::rgb(0x6c, 0x4e, 0xe3), Color32::WHITE);
        let style = ChatStyle::from_config(&config);
        let ctx = egui::Context::default();

        let mut output = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                output = Some(render_message_list(ui, &messages, &me, &config, &style));
            });
        });

        let output = output.expect("list rendered");
        assert_eq!(output.topmost, Some(0));
        assert!(output.rows_height > style.metrics.avatar_size * messages.len() as f32);
    }

    #[test]
    fn test_empty_list() {
        let (me, _) = conversation();
        let config = ChatConfig::new(ColorValue::rgb(0, 0, 0), Color32::WHITE);
        let style = ChatStyle::from_config(&config);
        let ctx = egui::Context::default();

        let mut output = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                output = Some(render_message_list(ui, &[], &me, &config, &style));
            });
        });

        let output = output.expect("list rendered");
        assert_eq!(output.topmost, None);
        assert_eq!(output.rows_height, 0.0);
    }
}
