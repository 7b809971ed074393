//! Floating date pill drawn over the top of the message list.

use eframe::egui::{self, Align2, Order};

use crate::ui::style::ChatStyle;

pub(crate) fn show_date_badge(
    ctx: &egui::Context,
    id: egui::Id,
    list_rect: egui::Rect,
    label: &str,
    style: &ChatStyle,
) {
    let m = &style.metrics;
    egui::Area::new(id)
        .order(Order::Foreground)
        .interactable(false)
        .pivot(Align2::CENTER_TOP)
        .fixed_pos(egui::pos2(list_rect.center().x, list_rect.top() + m.badge_top))
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(style.badge.fill)
                .corner_radius(10.0)
                .inner_margin(egui::Margin::symmetric(15, 5))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(label)
                            .size(m.badge_font)
                            .strong()
                            .color(style.badge.text),
                    );
                });
        });
}
