//! Integration tests for the chat widget.
//!
//! These drive `ChatView` headlessly through `egui::Context::run` and check
//! the contract with the host: messages are never modified, sends arrive
//! trimmed through the handler, the list follows the newest message and
//! the date badge reacts to real wheel input.

#![cfg(test)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Duration, TimeZone, Utc};
use crossbeam_channel::unbounded;
use eframe::egui;

use crate::clock::{Clock, ManualClock};
use crate::config::{ChatConfig, ColorValue};
use crate::date_badge::{BadgeState, HIDE_DELAY};
use crate::date_format::format_badge_date;
use crate::handler::{ChatCallbacks, ChatEvent, ChatHandler};
use crate::model::{Message, User};
use crate::ui::composer::{ATTACHMENT_GLYPH, EMOJI_GLYPH};
use crate::ui::ChatView;

const SCREEN: egui::Vec2 = egui::vec2(400.0, 600.0);
/// A point inside the message list, above the composer.
const LIST_POINT: egui::Pos2 = egui::pos2(200.0, 250.0);
/// Enough frames for wheel smoothing and scroll animations to finish.
const SETTLE_FRAMES: usize = 60;

fn config() -> ChatConfig {
    ChatConfig::new(ColorValue::rgb(0x6c, 0x4e, 0xe3), ColorValue::rgb(255, 255, 255))
}

fn me() -> User {
    User::new(1, "John Smith")
}

fn message(id: i64) -> Message {
    let start = Utc.with_ymd_and_hms(2024, 6, 17, 9, 0, 0).unwrap();
    let sender = if id % 3 == 0 {
        me()
    } else {
        User::new(2, "Ada Lovelace").with_avatar("https://example.com/ada.png")
    };
    Message::new(
        id,
        format!("message {id} see https://example.com/{id}"),
        start + Duration::hours(id * 7),
        sender,
    )
}

fn conversation(count: i64) -> Vec<Message> {
    (0..count).map(message).collect()
}

fn input(events: Vec<egui::Event>) -> egui::RawInput {
    egui::RawInput {
        screen_rect: Some(egui::Rect::from_min_size(egui::Pos2::ZERO, SCREEN)),
        events,
        ..Default::default()
    }
}

fn key(key: egui::Key, modifiers: egui::Modifiers) -> egui::RawInput {
    egui::RawInput {
        modifiers,
        ..input(vec![egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }])
    }
}

fn frame(
    ctx: &egui::Context,
    raw: egui::RawInput,
    view: &mut ChatView<impl Clock>,
    messages: &[Message],
    handler: &mut dyn ChatHandler,
) -> egui::FullOutput {
    ctx.run(raw, |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| view.show(ui, messages, handler));
    })
}

fn settle(
    ctx: &egui::Context,
    view: &mut ChatView<impl Clock>,
    messages: &[Message],
    handler: &mut dyn ChatHandler,
) {
    for _ in 0..SETTLE_FRAMES {
        frame(ctx, input(vec![]), view, messages, handler);
    }
}

/// Hover the list, then turn the mouse wheel by `dy` points (positive is up).
fn wheel(
    ctx: &egui::Context,
    dy: f32,
    view: &mut ChatView<impl Clock>,
    messages: &[Message],
    handler: &mut dyn ChatHandler,
) {
    let hover = egui::Event::PointerMoved(LIST_POINT);
    let turn = egui::Event::MouseWheel {
        unit: egui::MouseWheelUnit::Point,
        delta: egui::vec2(0.0, dy),
        modifiers: egui::Modifiers::NONE,
    };
    frame(ctx, input(vec![hover.clone()]), view, messages, handler);
    frame(ctx, input(vec![hover, turn]), view, messages, handler);
}

fn click(
    ctx: &egui::Context,
    pos: egui::Pos2,
    view: &mut ChatView<impl Clock>,
    messages: &[Message],
    handler: &mut dyn ChatHandler,
) {
    let button = |pressed| egui::Event::PointerButton {
        pos,
        button: egui::PointerButton::Primary,
        pressed,
        modifiers: egui::Modifiers::NONE,
    };
    frame(ctx, input(vec![egui::Event::PointerMoved(pos)]), view, messages, handler);
    frame(ctx, input(vec![button(true)]), view, messages, handler);
    frame(ctx, input(vec![button(false)]), view, messages, handler);
}

/// Center of the painted text exactly equal to `needle`.
fn text_center(output: &egui::FullOutput, needle: &str) -> Option<egui::Pos2> {
    fn find(shape: &egui::Shape, needle: &str) -> Option<egui::Pos2> {
        match shape {
            egui::Shape::Text(text) if text.galley.text() == needle => {
                Some(text.visual_bounding_rect().center())
            }
            egui::Shape::Vec(shapes) => shapes.iter().find_map(|s| find(s, needle)),
            _ => None,
        }
    }
    output.shapes.iter().find_map(|clipped| find(&clipped.shape, needle))
}

fn end_reached_count(events: &[ChatEvent]) -> usize {
    events.iter().filter(|e| **e == ChatEvent::EndReached).count()
}

#[test]
fn test_render_never_mutates_messages() {
    let ctx = egui::Context::default();
    let messages = conversation(40);
    let before = serde_json::to_string(&messages).unwrap();
    let mut view = ChatView::new(config(), me());
    let mut events: Vec<ChatEvent> = Vec::new();

    for _ in 0..5 {
        frame(&ctx, input(vec![]), &mut view, &messages, &mut events);
    }

    assert_eq!(serde_json::to_string(&messages).unwrap(), before);
    assert!(events.is_empty());
}

#[test]
fn test_style_is_memoized_across_frames() {
    let ctx = egui::Context::default();
    let messages = conversation(3);
    let mut view = ChatView::new(config(), me());
    let mut events: Vec<ChatEvent> = Vec::new();

    for _ in 0..4 {
        frame(&ctx, input(vec![]), &mut view, &messages, &mut events);
    }
    assert_eq!(view.style_recomputes(), 1);

    view.config_mut().theme_color = ColorValue::rgb(0, 128, 0);
    frame(&ctx, input(vec![]), &mut view, &messages, &mut events);
    frame(&ctx, input(vec![]), &mut view, &messages, &mut events);
    assert_eq!(view.style_recomputes(), 2);
}

#[test]
fn test_submit_trims_and_clears() {
    let mut view = ChatView::new(config(), me());
    let mut events: Vec<ChatEvent> = Vec::new();

    view.composer_mut().draft = "  hello  ".to_string();
    assert!(view.submit_draft(&mut events));
    assert_eq!(events, vec![ChatEvent::Send("hello".to_string())]);
    assert_eq!(view.composer().draft, "");
}

#[test]
fn test_whitespace_draft_is_not_sent() {
    let sent = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = Rc::clone(&sent);
    let mut callbacks = ChatCallbacks::new(move |text| sink.borrow_mut().push(text));
    let mut view = ChatView::new(config(), me());

    view.composer_mut().draft = "   \n  ".to_string();
    assert!(!view.submit_draft(&mut callbacks));
    assert!(sent.borrow().is_empty());
}

#[test]
fn test_enter_in_composer_sends() {
    let ctx = egui::Context::default();
    let messages = conversation(2);
    let mut view = ChatView::new(config(), me());
    let mut events: Vec<ChatEvent> = Vec::new();

    frame(&ctx, input(vec![]), &mut view, &messages, &mut events);
    view.composer_mut().draft = "  hello  ".to_string();
    let id = view.composer_id();
    ctx.memory_mut(|mem| mem.request_focus(id));

    let enter = key(egui::Key::Enter, egui::Modifiers::NONE);
    frame(&ctx, enter, &mut view, &messages, &mut events);

    assert_eq!(events, vec![ChatEvent::Send("hello".to_string())]);
    assert_eq!(view.composer().draft, "");
    // the host's list is untouched; it is the host's job to append
    assert_eq!(messages.len(), 2);
}

#[test]
fn test_enter_on_blank_draft_is_noop() {
    let ctx = egui::Context::default();
    let messages = conversation(2);
    let mut view = ChatView::new(config(), me());
    let mut events: Vec<ChatEvent> = Vec::new();

    frame(&ctx, input(vec![]), &mut view, &messages, &mut events);
    let id = view.composer_id();
    ctx.memory_mut(|mem| mem.request_focus(id));
    let enter = key(egui::Key::Enter, egui::Modifiers::NONE);
    frame(&ctx, enter, &mut view, &messages, &mut events);

    assert!(events.is_empty());
}

#[test]
fn test_shift_enter_inserts_newline() {
    let ctx = egui::Context::default();
    let messages = conversation(2);
    let mut view = ChatView::new(config(), me());
    let mut events: Vec<ChatEvent> = Vec::new();

    frame(&ctx, input(vec![]), &mut view, &messages, &mut events);
    view.composer_mut().draft = "hi".to_string();
    let id = view.composer_id();
    ctx.memory_mut(|mem| mem.request_focus(id));
    let shift_enter = key(egui::Key::Enter, egui::Modifiers::SHIFT);
    frame(&ctx, shift_enter, &mut view, &messages, &mut events);

    assert!(events.is_empty());
    let draft = &view.composer().draft;
    assert!(draft.contains('\n'), "draft was {draft:?}");
    assert_eq!(draft.trim(), "hi");
}

#[test]
fn test_sends_reach_worker_channel() {
    let ctx = egui::Context::default();
    let messages = conversation(2);
    let (tx, rx) = unbounded::<ChatEvent>();
    let mut handler = tx;
    let mut view = ChatView::new(config(), me());

    frame(&ctx, input(vec![]), &mut view, &messages, &mut handler);
    view.composer_mut().draft = "ping".to_string();
    let id = view.composer_id();
    ctx.memory_mut(|mem| mem.request_focus(id));
    let enter = key(egui::Key::Enter, egui::Modifiers::NONE);
    frame(&ctx, enter, &mut view, &messages, &mut handler);

    assert_eq!(rx.try_recv(), Ok(ChatEvent::Send("ping".to_string())));
}

#[test]
fn test_action_buttons_report_without_touching_draft() {
    let ctx = egui::Context::default();
    let messages = conversation(2);
    let mut cfg = config();
    cfg.show_emoji = true;
    cfg.show_attachment = true;
    let mut view = ChatView::new(cfg, me());
    let mut events: Vec<ChatEvent> = Vec::new();
    view.composer_mut().draft = "half typed".to_string();

    let output = frame(&ctx, input(vec![]), &mut view, &messages, &mut events);
    let emoji = text_center(&output, EMOJI_GLYPH).expect("emoji button painted");
    let attachment = text_center(&output, ATTACHMENT_GLYPH).expect("attachment button painted");

    click(&ctx, emoji, &mut view, &messages, &mut events);
    assert_eq!(events, vec![ChatEvent::EmojiPressed]);

    click(&ctx, attachment, &mut view, &messages, &mut events);
    assert_eq!(events, vec![ChatEvent::EmojiPressed, ChatEvent::AttachmentPressed]);
    assert_eq!(view.composer().draft, "half typed");
}

#[test]
fn test_action_buttons_hidden_by_default() {
    let ctx = egui::Context::default();
    let messages = conversation(2);
    let mut view = ChatView::new(config(), me());
    let mut events: Vec<ChatEvent> = Vec::new();

    let output = frame(&ctx, input(vec![]), &mut view, &messages, &mut events);
    assert_eq!(text_center(&output, EMOJI_GLYPH), None);
    assert_eq!(text_center(&output, ATTACHMENT_GLYPH), None);
}

#[test]
fn test_custom_footer_replaces_composer() {
    let ctx = egui::Context::default();
    let messages = conversation(2);
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let mut view = ChatView::new(config(), me()).custom_footer(move |ui| {
        *counter.borrow_mut() += 1;
        ui.label("read only");
    });
    let mut events: Vec<ChatEvent> = Vec::new();

    view.composer_mut().draft = "unsent".to_string();
    frame(&ctx, input(vec![]), &mut view, &messages, &mut events);
    let id = view.composer_id();
    ctx.memory_mut(|mem| mem.request_focus(id));
    let enter = key(egui::Key::Enter, egui::Modifiers::NONE);
    frame(&ctx, enter, &mut view, &messages, &mut events);

    assert_eq!(*calls.borrow(), 2);
    assert!(events.is_empty());
    assert_eq!(view.composer().draft, "unsent");
}

#[test]
fn test_list_opens_at_newest_and_follows_new_messages() {
    let ctx = egui::Context::default();
    let mut messages = conversation(40);
    let mut view = ChatView::new(config(), me());
    let mut events: Vec<ChatEvent> = Vec::new();

    settle(&ctx, &mut view, &messages, &mut events);
    let opened = view.topmost_id().expect("a message is visible");
    assert!(opened > 10, "list should start scrolled to the end, topmost was {opened}");

    messages.extend((40..43).map(message));
    settle(&ctx, &mut view, &messages, &mut events);
    let after = view.topmost_id().expect("a message is visible");
    assert!(after > opened, "topmost {after} should pass {opened} after new messages");
    assert!(events.is_empty());
}

#[test]
fn test_composer_focus_scrolls_to_newest() {
    let ctx = egui::Context::default();
    let messages = conversation(40);
    let mut view = ChatView::new(config(), me());
    let mut events: Vec<ChatEvent> = Vec::new();

    settle(&ctx, &mut view, &messages, &mut events);
    let newest = view.topmost_id();

    wheel(&ctx, 600.0, &mut view, &messages, &mut events);
    settle(&ctx, &mut view, &messages, &mut events);
    assert!(view.topmost_id() < newest, "wheel should move away from the end");

    let id = view.composer_id();
    ctx.memory_mut(|mem| mem.request_focus(id));
    settle(&ctx, &mut view, &messages, &mut events);
    assert_eq!(view.topmost_id(), newest);
}

#[test]
fn test_wheel_shows_badge_until_delay_after_stop() {
    let ctx = egui::Context::default();
    let clock = ManualClock::new();
    let messages = conversation(40);
    let mut view = ChatView::with_clock(config(), me(), clock.clone());
    let mut events: Vec<ChatEvent> = Vec::new();

    settle(&ctx, &mut view, &messages, &mut events);
    assert_eq!(view.badge().state(), &BadgeState::Hidden);

    wheel(&ctx, 300.0, &mut view, &messages, &mut events);
    frame(&ctx, input(vec![]), &mut view, &messages, &mut events);
    assert!(
        matches!(view.badge().state(), BadgeState::Visible(label) if !label.is_empty()),
        "badge state was {:?}",
        view.badge().state()
    );

    // Motion has stopped; the badge lingers until the clock moves.
    settle(&ctx, &mut view, &messages, &mut events);
    let topmost = view.topmost_id().expect("a message is visible");
    let expected = format_badge_date(&messages[topmost as usize].created_at);
    assert_eq!(view.badge().state(), &BadgeState::Visible(expected));
    assert_eq!(view.badge().time_until_hide(), Some(HIDE_DELAY));

    clock.advance(HIDE_DELAY);
    frame(&ctx, input(vec![]), &mut view, &messages, &mut events);
    assert_eq!(view.badge().state(), &BadgeState::Hidden);
}

#[test]
fn test_scrolling_to_top_reports_end_once() {
    let ctx = egui::Context::default();
    let messages = conversation(40);
    let mut view = ChatView::new(config(), me());
    let mut events: Vec<ChatEvent> = Vec::new();

    settle(&ctx, &mut view, &messages, &mut events);
    assert_eq!(end_reached_count(&events), 0);

    wheel(&ctx, 20_000.0, &mut view, &messages, &mut events);
    settle(&ctx, &mut view, &messages, &mut events);
    assert_eq!(view.topmost_id(), Some(0));
    assert_eq!(end_reached_count(&events), 1);

    // Wheeling further at the top is not a new arrival.
    wheel(&ctx, 500.0, &mut view, &messages, &mut events);
    settle(&ctx, &mut view, &messages, &mut events);
    assert_eq!(end_reached_count(&events), 1);
}

#[test]
fn test_badge_stays_hidden_without_user_scrolling() {
    let ctx = egui::Context::default();
    let clock = ManualClock::new();
    let mut messages = conversation(30);
    let mut view = ChatView::with_clock(config(), me(), clock.clone());
    let mut events: Vec<ChatEvent> = Vec::new();

    for _ in 0..3 {
        frame(&ctx, input(vec![]), &mut view, &messages, &mut events);
    }
    // a new message triggers a programmatic jump to the newest entry
    messages.push(message(99));
    for _ in 0..3 {
        frame(&ctx, input(vec![]), &mut view, &messages, &mut events);
        clock.advance(std::time::Duration::from_millis(200));
    }

    assert_eq!(view.badge().state(), &BadgeState::Hidden);
    assert!(!view.badge().label().is_empty());
    assert!(events.is_empty());
}

#[test]
fn test_emptied_conversation_forgets_topmost() {
    let ctx = egui::Context::default();
    let messages = conversation(10);
    let mut view = ChatView::new(config(), me());
    let mut events: Vec<ChatEvent> = Vec::new();

    frame(&ctx, input(vec![]), &mut view, &messages, &mut events);
    assert!(view.topmost_id().is_some());
    assert!(!view.badge().label().is_empty());

    frame(&ctx, input(vec![]), &mut view, &[], &mut events);
    assert_eq!(view.topmost_id(), None);
    assert_eq!(view.badge().label(), "");
}

#[test]
fn test_empty_conversation_renders() {
    let ctx = egui::Context::default();
    let mut view = ChatView::new(config(), me()).id_salt("empty");
    let mut events: Vec<ChatEvent> = Vec::new();

    frame(&ctx, input(vec![]), &mut view, &[], &mut events);
    assert_eq!(view.topmost_id(), None);
    assert_eq!(view.badge().label(), "");
    assert!(events.is_empty());
}
