//! bubblechat demo - a single conversation with an echo bot.
//!
//! Architecture:
//! - Main thread: runs the egui UI and owns the message list
//! - Bot thread: answers every sent message after a short delay
//! - Communication via crossbeam channels

use std::thread;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use crossbeam_channel::{unbounded, Receiver, Sender};
use eframe::egui;

use bubblechat::config::{load_config, save_config, settings_path};
use bubblechat::logging::init_tracing;
use bubblechat::{ChatConfig, ChatEvent, ChatView, ColorValue, Message, User};

const BOT_DELAY: Duration = Duration::from_millis(700);
/// Pages of older history the demo can "fetch" when scrolled to the top
const HISTORY_PAGES: i64 = 3;
const PAGE_SIZE: i64 = 10;

const ME_ID: i64 = 1;
const BOT_ID: i64 = 2;

fn me() -> User {
    User::new(ME_ID, "John Smith")
}

fn bot() -> User {
    User::new(BOT_ID, "Echo Bot")
}

// ============================================================================
// Bot worker
// ============================================================================

enum BotEvent {
    Reply(String),
}

fn run_bot(requests: Receiver<String>, replies: Sender<BotEvent>, ctx: egui::Context) {
    while let Ok(text) = requests.recv() {
        thread::sleep(BOT_DELAY);
        let reply = format!("You said: {text} (see https://docs.rs/egui)");
        if replies.send(BotEvent::Reply(reply)).is_err() {
            break;
        }
        ctx.request_repaint();
    }
    tracing::debug!("bot worker stopped");
}

// ============================================================================
// App
// ============================================================================

struct DemoApp {
    messages: Vec<Message>,
    view: ChatView,
    next_id: i64,
    pages_loaded: i64,
    dark: bool,
    bot_tx: Sender<String>,
    reply_rx: Receiver<BotEvent>,
}

impl DemoApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let (bot_tx, bot_rx) = unbounded::<String>();
        let (reply_tx, reply_rx) = unbounded::<BotEvent>();
        let ctx = cc.egui_ctx.clone();
        thread::spawn(move || run_bot(bot_rx, reply_tx, ctx));

        let config = settings_path()
            .filter(|path| path.exists())
            .and_then(|path| match load_config(&path) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "loaded chat style");
                    Some(config)
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), "failed to load chat style: {e}");
                    None
                }
            })
            .unwrap_or_else(light_style);

        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let messages = seed_conversation();
        let next_id = messages.len() as i64 + 1;
        Self {
            messages,
            view: ChatView::new(config, me()),
            next_id,
            pages_loaded: 0,
            dark: false,
            bot_tx,
            reply_rx,
        }
    }

    fn push(&mut self, text: String, sender: User) {
        let message = Message::new(self.next_id, text, Utc::now(), sender);
        self.next_id += 1;
        self.messages.push(message);
    }

    fn handle(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::Send(text) => {
                self.push(text.clone(), me());
                if self.bot_tx.send(text).is_err() {
                    tracing::warn!("bot worker is gone");
                }
            }
            ChatEvent::EmojiPressed => self.view.composer_mut().draft.push('🙂'),
            ChatEvent::AttachmentPressed => {
                tracing::info!("attachment picker is not available in the demo");
            }
            ChatEvent::EndReached => self.load_older(),
        }
    }

    fn load_older(&mut self) {
        if self.pages_loaded >= HISTORY_PAGES {
            return;
        }
        self.pages_loaded += 1;
        let oldest = self
            .messages
            .first()
            .map(|m| m.created_at)
            .unwrap_or_else(Utc::now);
        let base = -self.pages_loaded * PAGE_SIZE;
        let mut older: Vec<Message> = (0..PAGE_SIZE)
            .map(|i| {
                let sender = if i % 2 == 0 { bot() } else { me() };
                let at = oldest - ChronoDuration::hours(6 * (PAGE_SIZE - i));
                Message::new(base + i, format!("Older message {}", base + i), at, sender)
            })
            .collect();
        tracing::info!(page = self.pages_loaded, "loaded older messages");
        older.append(&mut self.messages);
        self.messages = older;
    }

    fn process_replies(&mut self) {
        while let Ok(event) = self.reply_rx.try_recv() {
            match event {
                BotEvent::Reply(text) => self.push(text, bot()),
            }
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.dark = !self.dark;
        let style = if self.dark { dark_style() } else { light_style() };
        *self.view.config_mut() = ChatConfig {
            show_emoji: self.view.config().show_emoji,
            show_attachment: self.view.config().show_attachment,
            ..style
        };
        let visuals = if self.dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);
    }

    fn save_style(&self) {
        let Some(path) = settings_path() else {
            tracing::warn!("no config directory available");
            return;
        };
        match save_config(&path, self.view.config()) {
            Ok(()) => tracing::info!(path = %path.display(), "saved chat style"),
            Err(e) => tracing::error!("failed to save chat style: {e}"),
        }
    }

    fn render_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Echo Bot");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Save style").clicked() {
                        self.save_style();
                    }
                    let label = if self.dark { "Light" } else { "Dark" };
                    if ui.button(label).clicked() {
                        self.toggle_theme(ctx);
                    }
                    let config = self.view.config_mut();
                    ui.checkbox(&mut config.show_attachment, "Attach");
                    ui.checkbox(&mut config.show_emoji, "Emoji");
                });
            });
        });
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_replies();
        self.render_toolbar(ctx);

        let mut events: Vec<ChatEvent> = Vec::new();
        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show(ctx, |ui| self.view.show(ui, &self.messages, &mut events));

        for event in events {
            self.handle(event);
        }
    }
}

fn light_style() -> ChatConfig {
    ChatConfig::new(ColorValue::rgb(0x6c, 0x4e, 0xe3), ColorValue::rgb(255, 255, 255))
}

fn dark_style() -> ChatConfig {
    ChatConfig {
        incoming_bubble_color: ColorValue::rgb(0x3a, 0x3a, 0x44),
        incoming_text_color: ColorValue::rgb(0xee, 0xee, 0xee),
        background_color: ColorValue::rgb(0x1e, 0x1e, 0x24),
        input_background_color: ColorValue::rgb(0x2a, 0x2a, 0x32),
        input_color: ColorValue::rgb(0xee, 0xee, 0xee),
        input_border_color: ColorValue::rgb(0x55, 0x55, 0x60),
        ..ChatConfig::new(ColorValue::rgb(0x8b, 0x74, 0xf0), ColorValue::rgb(255, 255, 255))
    }
}

fn seed_conversation() -> Vec<Message> {
    let now = Utc::now();
    let lines = [
        (bot(), 3 * 24 * 60, "Hi! Type anything and I will echo it back."),
        (me(), 3 * 24 * 60 - 2, "Does it handle links like https://github.com/emilk/egui ?"),
        (bot(), 26 * 60, "It does. Scroll up to see the date badge."),
        (me(), 25 * 60, "Nice"),
        (bot(), 5, "Scrolling to the very top loads older history."),
    ];
    lines
        .into_iter()
        .enumerate()
        .map(|(i, (sender, minutes_ago, text))| {
            Message::new(i as i64 + 1, text, now - ChronoDuration::minutes(minutes_ago), sender)
        })
        .collect()
}

fn main() -> eframe::Result<()> {
    init_tracing();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 720.0])
            .with_min_inner_size([320.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "bubblechat demo",
        options,
        Box::new(|cc| Ok(Box::new(DemoApp::new(cc)))),
    )
}
