//! One-way notifications from the widget to the host application.
//!
//! The widget never touches the host's message store. It reports what the
//! user did through a [`ChatHandler`], which can be a set of closures, a
//! recorder, or a channel into a worker thread.

use crossbeam_channel::Sender;

/// Events emitted by the chat widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Composer submitted this (already trimmed, non-empty) text
    Send(String),
    /// Emoji button pressed
    EmojiPressed,
    /// Attachment button pressed
    AttachmentPressed,
    /// Scrolled to the oldest loaded message
    EndReached,
}

/// Host-side receiver of widget events. Only sending is mandatory.
pub trait ChatHandler {
    fn on_send(&mut self, text: String);

    fn on_press_emoji(&mut self) {}

    fn on_press_attachment(&mut self) {}

    fn on_end_reached(&mut self) {}

    /// Route a [`ChatEvent`] to the matching method.
    fn dispatch(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::Send(text) => self.on_send(text),
            ChatEvent::EmojiPressed => self.on_press_emoji(),
            ChatEvent::AttachmentPressed => self.on_press_attachment(),
            ChatEvent::EndReached => self.on_end_reached(),
        }
    }
}

type Callback = Box<dyn FnMut()>;

/// Closure-based handler; unset optional callbacks are no-ops.
pub struct ChatCallbacks {
    on_send: Box<dyn FnMut(String)>,
    on_press_emoji: Option<Callback>,
    on_press_attachment: Option<Callback>,
    on_end_reached: Option<Callback>,
}

impl ChatCallbacks {
    pub fn new(on_send: impl FnMut(String) + 'static) -> Self {
        Self {
            on_send: Box::new(on_send),
            on_press_emoji: None,
            on_press_attachment: None,
            on_end_reached: None,
        }
    }

    pub fn with_emoji(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_press_emoji = Some(Box::new(f));
        self
    }

    pub fn with_attachment(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_press_attachment = Some(Box::new(f));
        self
    }

    pub fn with_end_reached(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_end_reached = Some(Box::new(f));
        self
    }
}

impl ChatHandler for ChatCallbacks {
    fn on_send(&mut self, text: String) {
        (self.on_send)(text);
    }

    fn on_press_emoji(&mut self) {
        if let Some(f) = self.on_press_emoji.as_mut() {
            f();
        }
    }

    fn on_press_attachment(&mut self) {
        if let Some(f) = self.on_press_attachment.as_mut() {
            f();
        }
    }

    fn on_end_reached(&mut self) {
        if let Some(f) = self.on_end_reached.as_mut() {
            f();
        }
    }
}

/// Records events in order; handy for hosts that process after the frame.
impl ChatHandler for Vec<ChatEvent> {
    fn on_send(&mut self, text: String) {
        self.push(ChatEvent::Send(text));
    }

    fn on_press_emoji(&mut self) {
        self.push(ChatEvent::EmojiPressed);
    }

    fn on_press_attachment(&mut self) {
        self.push(ChatEvent::AttachmentPressed);
    }

    fn on_end_reached(&mut self) {
        self.push(ChatEvent::EndReached);
    }
}

/// Forwards events to another thread. A closed channel drops the event.
impl ChatHandler for Sender<ChatEvent> {
    fn on_send(&mut self, text: String) {
        self.dispatch(ChatEvent::Send(text));
    }

    fn on_press_emoji(&mut self) {
        self.dispatch(ChatEvent::EmojiPressed);
    }

    fn on_press_attachment(&mut self) {
        self.dispatch(ChatEvent::AttachmentPressed);
    }

    fn on_end_reached(&mut self) {
        self.dispatch(ChatEvent::EndReached);
    }

    fn dispatch(&mut self, event: ChatEvent) {
        if self.send(event).is_err() {
            tracing::warn!("chat event receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_callbacks_forward_text() {
        let sent = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&sent);
        let mut callbacks = ChatCallbacks::new(move |text| sink.borrow_mut().push(text));

        callbacks.on_send("hello".to_string());
        assert_eq!(*sent.borrow(), vec!["hello".to_string()]);
    }

    #[test]
    fn test_missing_optional_callbacks_are_noops() {
        let mut callbacks = ChatCallbacks::new(|_| {});
        callbacks.on_press_emoji();
        callbacks.on_press_attachment();
        callbacks.on_end_reached();
    }

    #[test]
    fn test_optional_callbacks_fire() {
        let hits = Rc::new(RefCell::new(0));
        let (a, b) = (Rc::clone(&hits), Rc::clone(&hits));
        let mut callbacks = ChatCallbacks::new(|_| {})
            .with_emoji(move || *a.borrow_mut() += 1)
            .with_end_reached(move || *b.borrow_mut() += 10);

        callbacks.dispatch(ChatEvent::EmojiPressed);
        callbacks.dispatch(ChatEvent::EndReached);
        callbacks.dispatch(ChatEvent::AttachmentPressed);
        assert_eq!(*hits.borrow(), 11);
    }

    #[test]
    fn test_sender_handler() {
        let (tx, rx) = unbounded::<ChatEvent>();
        let mut handler = tx;
        handler.on_send("hi".to_string());
        handler.on_press_attachment();

        assert_eq!(rx.try_recv(), Ok(ChatEvent::Send("hi".to_string())));
        assert_eq!(rx.try_recv(), Ok(ChatEvent::AttachmentPressed));
    }

    #[test]
    fn test_sender_handler_tolerates_closed_channel() {
        let (tx, rx) = unbounded::<ChatEvent>();
        drop(rx);
        let mut handler = tx;
        handler.on_send("lost".to_string());
    }

    #[test]
    fn test_recorder() {
        let mut events: Vec<ChatEvent> = Vec::new();
        events.on_send("a".to_string());
        events.on_end_reached();
        assert_eq!(events, vec![ChatEvent::Send("a".to_string()), ChatEvent::EndReached]);
    }
}
