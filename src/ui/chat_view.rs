//! The chat widget: message list, floating date badge and composer.

use std::hash::Hash;

use eframe::egui::{self, Align};

use crate::clock::{Clock, SystemClock};
use crate::composer::ComposerState;
use crate::config::ChatConfig;
use crate::date_badge::{BadgeState, DateBadge};
use crate::handler::ChatHandler;
use crate::model::{Message, User};
use crate::ui::avatar::image_source;
use crate::ui::composer::render_composer;
use crate::ui::date_badge::show_date_badge;
use crate::ui::messages::render_message_list;
use crate::ui::scroll::{ScrollEvent, ScrollTracker};
use crate::ui::style::{ChatStyle, StyleCache};

type FooterFn = Box<dyn FnMut(&mut egui::Ui)>;

/// A chat conversation view.
///
/// The host owns the messages and passes them in every frame as a
/// chronological slice; the view keeps only UI state (draft, badge,
/// scroll tracking). New outgoing text goes back through the
/// [`ChatHandler`] given to [`ChatView::show`].
///
/// ```no_run
/// # use bubblechat::{ChatConfig, ChatView, ChatEvent, ColorValue, Message, User};
/// # fn demo(ui: &mut eframe::egui::Ui, messages: &mut Vec<Message>) {
/// let me = User::new(1, "John Smith");
/// let config = ChatConfig::new(ColorValue::rgb(0x6c, 0x4e, 0xe3), ColorValue::rgb(255, 255, 255));
/// let mut view = ChatView::new(config, me);
///
/// let mut events: Vec<ChatEvent> = Vec::new();
/// view.show(ui, messages, &mut events);
/// # }
/// ```
pub struct ChatView<C: Clock = SystemClock> {
    id: egui::Id,
    config: ChatConfig,
    user: User,
    composer: ComposerState,
    badge: DateBadge<C>,
    styles: StyleCache,
    scroll: ScrollTracker,
    /// (length, newest id) of the slice seen last frame
    last_seen: Option<(usize, Option<i64>)>,
    scroll_to_end: bool,
    topmost: Option<i64>,
    composer_focused: bool,
    rows_height: f32,
    custom_footer: Option<FooterFn>,
}

impl ChatView<SystemClock> {
    pub fn new(config: ChatConfig, user: User) -> Self {
        Self::with_clock(config, user, SystemClock)
    }
}

impl<C: Clock> ChatView<C> {
    pub fn with_clock(config: ChatConfig, user: User, clock: C) -> Self {
        Self {
            id: egui::Id::new("bubblechat"),
            config,
            user,
            composer: ComposerState::new(),
            badge: DateBadge::with_clock(clock),
            styles: StyleCache::new(),
            scroll: ScrollTracker::new(),
            last_seen: None,
            scroll_to_end: true,
            topmost: None,
            composer_focused: false,
            rows_height: 0.0,
            custom_footer: None,
        }
    }

    /// Distinguish several chat views in one egui context.
    pub fn id_salt(mut self, salt: impl Hash) -> Self {
        self.id = egui::Id::new(("bubblechat", salt));
        self
    }

    /// Replace the whole composer region.
    pub fn custom_footer(mut self, footer: impl FnMut(&mut egui::Ui) + 'static) -> Self {
        self.custom_footer = Some(Box::new(footer));
        self
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Styling changes are picked up on the next frame.
    pub fn config_mut(&mut self) -> &mut ChatConfig {
        &mut self.config
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn set_user(&mut self, user: User) {
        self.user = user;
    }

    pub fn composer(&self) -> &ComposerState {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut ComposerState {
        &mut self.composer
    }

    pub fn badge(&self) -> &DateBadge<C> {
        &self.badge
    }

    /// Id of the composer's text field, for focus control.
    pub fn composer_id(&self) -> egui::Id {
        self.id.with("draft")
    }

    /// Id of the topmost message visible in the list, as of the last frame.
    pub fn topmost_id(&self) -> Option<i64> {
        self.topmost
    }

    pub fn style_recomputes(&self) -> usize {
        self.styles.recomputes()
    }

    /// Send the draft if it has any non-whitespace text.
    ///
    /// Returns whether the handler was called.
    pub fn submit_draft(&mut self, handler: &mut dyn ChatHandler) -> bool {
        match self.composer.submit() {
            Some(text) => {
                tracing::debug!(len = text.len(), "sending message");
                handler.on_send(text);
                true
            }
            None => false,
        }
    }

    /// Render the widget into all of `ui`'s remaining space.
    pub fn show(&mut self, ui: &mut egui::Ui, messages: &[Message], handler: &mut dyn ChatHandler) {
        let style = self.styles.get(&self.config).clone();
        self.note_messages(messages);

        let rect = ui.available_rect_before_wrap();
        self.paint_background(ui, rect, &style);

        let pad = style.metrics.footer_padding as i8;
        egui::TopBottomPanel::bottom(self.id.with("footer"))
            .frame(egui::Frame::new().inner_margin(egui::Margin::same(pad)))
            .show_separator_line(false)
            .show_inside(ui, |ui| self.show_footer(ui, &style, handler));

        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show_inside(ui, |ui| self.show_list(ui, messages, &style, handler));
    }

    fn note_messages(&mut self, messages: &[Message]) {
        let seen = (messages.len(), messages.last().map(|m| m.id));
        if self.last_seen != Some(seen) {
            self.last_seen = Some(seen);
            self.scroll_to_end = true;
        }
    }

    fn paint_background(&self, ui: &egui::Ui, rect: egui::Rect, style: &ChatStyle) {
        match &self.config.background_image {
            Some(uri) => {
                egui::Image::new(image_source(&uri.as_str().into(), rect.size()))
                    .paint_at(ui, rect);
            }
            None => {
                ui.painter().rect_filled(rect, 0.0, style.background);
            }
        }
    }

    fn show_footer(&mut self, ui: &mut egui::Ui, style: &ChatStyle, handler: &mut dyn ChatHandler) {
        if let Some(footer) = self.custom_footer.as_mut() {
            footer(ui);
            return;
        }

        let edit_id = self.composer_id();
        let out = render_composer(ui, &mut self.composer, &self.config, style, edit_id);
        if out.submit {
            self.submit_draft(handler);
        }
        if out.emoji_pressed {
            handler.on_press_emoji();
        }
        if out.attachment_pressed {
            handler.on_press_attachment();
        }
        // Focus changes stand in for the on-screen keyboard appearing.
        if out.has_focus != self.composer_focused {
            self.composer_focused = out.has_focus;
            self.scroll_to_end = true;
        }
    }

    fn show_list(
        &mut self,
        ui: &mut egui::Ui,
        messages: &[Message],
        style: &ChatStyle,
        handler: &mut dyn ChatHandler,
    ) {
        let list_rect = ui.max_rect();
        // Read before the scroll area consumes the wheel delta.
        let user_input = ui.rect_contains_pointer(list_rect)
            && ui.input(|i| {
                i.smooth_scroll_delta.y != 0.0 || i.pointer.is_decidedly_dragging()
            });

        let jump_to_end = std::mem::take(&mut self.scroll_to_end);
        let spare = (list_rect.height() - self.rows_height).max(0.0);

        let output = egui::ScrollArea::vertical()
            .id_salt(self.id.with("list"))
            .auto_shrink([false; 2])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                // Short conversations sit on the composer, not under the top edge.
                ui.add_space(spare);
                let list = render_message_list(ui, messages, &self.user, &self.config, style);
                if jump_to_end {
                    ui.scroll_to_cursor(Some(Align::BOTTOM));
                }
                list
            });

        let list = output.inner;
        if (list.rows_height - self.rows_height).abs() > 0.5 {
            self.rows_height = list.rows_height;
            ui.ctx().request_repaint();
        }

        match list.topmost.and_then(|i| messages.get(i)) {
            Some(message) if self.topmost != Some(message.id) => {
                self.topmost = Some(message.id);
                self.badge.on_topmost_changed(&message.created_at);
            }
            None if messages.is_empty() && self.topmost.is_some() => {
                self.topmost = None;
                self.badge.clear_label();
            }
            _ => {}
        }

        let events = self.scroll.observe(
            output.state.offset.y,
            output.inner_rect.height(),
            output.content_size.y,
            user_input,
        );
        for event in events {
            match event {
                ScrollEvent::Started => self.badge.on_scroll_start(),
                ScrollEvent::Ended => self.badge.on_scroll_end(),
                ScrollEvent::ReachedOldest => {
                    tracing::debug!(loaded = messages.len(), "reached oldest loaded message");
                    handler.on_end_reached();
                }
            }
        }

        self.badge.tick();
        if self.scroll.is_moving() {
            ui.ctx().request_repaint();
        } else if let Some(delay) = self.badge.time_until_hide() {
            ui.ctx().request_repaint_after(delay);
        }

        if let BadgeState::Visible(label) = self.badge.state() {
            if !label.is_empty() {
                show_date_badge(ui.ctx(), self.id.with("date_badge"), list_rect, label, style);
            }
        }
    }
}
