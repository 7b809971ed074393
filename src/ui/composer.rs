//! Composer footer: pill-shaped text field with optional emoji and
//! attachment buttons, plus a round send button.

use eframe::egui::{self, Key, Modifiers};

use crate::composer::ComposerState;
use crate::config::ChatConfig;
use crate::ui::style::ChatStyle;

pub(crate) const EMOJI_GLYPH: &str = "☺";
pub(crate) const ATTACHMENT_GLYPH: &str = "📎";
const SEND_GLYPH: &str = "▶";

/// What happened in the footer this frame.
#[derive(Debug, Default)]
pub(crate) struct ComposerOutput {
    /// Enter or the send button was used
    pub submit: bool,
    pub emoji_pressed: bool,
    pub attachment_pressed: bool,
    pub has_focus: bool,
}

/// Render the composer. Submitting is left to the caller so the draft is
/// only consumed in one place.
///
/// Enter (without Shift) submits, Shift+Enter inserts a newline, Escape
/// clears the draft.
pub(crate) fn render_composer(
    ui: &mut egui::Ui,
    state: &mut ComposerState,
    config: &ChatConfig,
    style: &ChatStyle,
    edit_id: egui::Id,
) -> ComposerOutput {
    let m = &style.metrics;
    let mut out = ComposerOutput::default();

    // Take Enter/Escape before the text edit sees them.
    let had_focus = ui.memory(|mem| mem.has_focus(edit_id));
    // consume_key ignores Shift, so look at the Enter events themselves too.
    let shift = ui.input(|i| {
        i.modifiers.shift
            || i.events.iter().any(|e| {
                matches!(e, egui::Event::Key { key: Key::Enter, modifiers, .. } if modifiers.shift)
            })
    });
    if had_focus && !shift {
        out.submit = ui.input_mut(|i| i.consume_key(Modifiers::NONE, Key::Enter));
        if ui.input_mut(|i| i.consume_key(Modifiers::NONE, Key::Escape)) {
            state.clear();
        }
    }

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = m.footer_padding;
        let field_width = (ui.available_width() - m.send_button_size - m.footer_padding).max(0.0);

        egui::Frame::new()
            .fill(style.input.fill)
            .stroke(egui::Stroke::new(1.0, style.input.border))
            .corner_radius(150.0)
            .inner_margin(egui::Margin::symmetric(10, 7))
            .show(ui, |ui| {
                ui.set_width((field_width - 22.0).max(0.0));
                ui.horizontal(|ui| {
                    if config.show_emoji && ui.add(action_button(EMOJI_GLYPH, style)).clicked() {
                        out.emoji_pressed = true;
                    }

                    let reserve = if config.show_attachment {
                        m.action_button_size + ui.spacing().item_spacing.x
                    } else {
                        0.0
                    };
                    let response = ui.add(
                        egui::TextEdit::multiline(&mut state.draft)
                            .id(edit_id)
                            .hint_text(
                                egui::RichText::new(&config.placeholder)
                                    .color(style.input.placeholder),
                            )
                            .text_color(style.input.text)
                            .frame(false)
                            .desired_rows(1)
                            .desired_width((ui.available_width() - reserve).max(0.0)),
                    );
                    out.has_focus = response.has_focus();

                    if config.show_attachment
                        && ui.add(action_button(ATTACHMENT_GLYPH, style)).clicked()
                    {
                        out.attachment_pressed = true;
                    }

                    if out.submit {
                        response.request_focus();
                        out.has_focus = true;
                    }
                });
            });

        let send = ui.add(
            egui::Button::new(
                egui::RichText::new(SEND_GLYPH)
                    .size(m.send_button_size * 0.4)
                    .color(style.send_button.text),
            )
            .fill(style.send_button.fill)
            .corner_radius(m.send_button_size / 2.0)
            .min_size(egui::vec2(m.send_button_size, m.send_button_size)),
        );
        if send.clicked() {
            out.submit = true;
        }
    });

    out
}

fn action_button(glyph: &str, style: &ChatStyle) -> egui::Button<'static> {
    let size = style.metrics.action_button_size;
    egui::Button::new(
        egui::RichText::new(glyph.to_string())
            .size(size * 0.6)
            .color(style.input.placeholder),
    )
    .frame(false)
    .min_size(egui::vec2(size, size))
}
