//! AVA, the scripted chat assistant.
//!
//! There is no model behind it: every submission gets the same reply after a
//! randomized presentation delay. Each submission schedules its own reply, so
//! replies can land out of order and after the panel is closed.

use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;
use std::time::Duration;

use chrono::{DateTime, Local};
use rand::Rng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::input::LineInput;
use crate::store::LocalStore;
use crate::tui::AppEvent;

pub const WELCOME_FLAG_KEY: &str = "ava-welcomed";

pub const WELCOME_TEXT: &str = "Hello! I'm AVA, your AI Development Assistant. I'm here to help you with coding, deployment, and any technical questions you might have. How can I assist you today?";

pub const REPLY_TEXT: &str = "I'm analyzing your request and preparing a response. How else can I assist you with your development needs?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplyId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatPanel {
    #[default]
    Closed,
    Open {
        minimized: bool,
    },
}

/// A reply waiting on its presentation delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyTicket {
    pub id: ReplyId,
    pub delay: Duration,
}

pub struct ChatWidget {
    panel: ChatPanel,
    messages: Vec<Message>,
    input: LineInput,
    pending: HashSet<ReplyId>,
    next_message_id: u64,
    next_reply_id: u64,
    delay_ms: RangeInclusive<u64>,
}

impl ChatWidget {
    pub fn new(delay_ms: RangeInclusive<u64>) -> Self {
        Self {
            panel: ChatPanel::Closed,
            messages: Vec::new(),
            input: LineInput::default(),
            pending: HashSet::new(),
            next_message_id: 0,
            next_reply_id: 0,
            delay_ms,
        }
    }

    /// Seed the welcome message unless the store says it was already shown.
    pub fn mount(&mut self, store: &mut LocalStore) {
        if store.contains(WELCOME_FLAG_KEY) {
            return;
        }

        self.push(Sender::Assistant, WELCOME_TEXT.to_string());
        if let Err(e) = store.set(WELCOME_FLAG_KEY, "true") {
            tracing::warn!(error = %e, "could not persist welcome flag");
        }
    }

    pub fn panel(&self) -> ChatPanel {
        self.panel
    }

    pub fn is_open(&self) -> bool {
        matches!(self.panel, ChatPanel::Open { .. })
    }

    /// Open and expanded; the only state that accepts typing.
    pub fn is_expanded(&self) -> bool {
        self.panel == ChatPanel::Open { minimized: false }
    }

    pub fn open(&mut self) {
        self.panel = ChatPanel::Open { minimized: false };
    }

    pub fn close(&mut self) {
        self.panel = ChatPanel::Closed;
    }

    pub fn toggle_minimize(&mut self) {
        if let ChatPanel::Open { minimized } = self.panel {
            self.panel = ChatPanel::Open {
                minimized: !minimized,
            };
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &LineInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut LineInput {
        &mut self.input
    }

    pub fn is_composing(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    /// Append the user's message and hand back a ticket for the scripted
    /// reply. Blank input changes nothing.
    pub fn submit(&mut self, rng: &mut impl Rng) -> Option<ReplyTicket> {
        if self.input.is_blank() {
            return None;
        }

        let text = self.input.take();
        self.push(Sender::User, text);

        let id = ReplyId(self.next_reply_id);
        self.next_reply_id += 1;
        self.pending.insert(id);

        let delay = Duration::from_millis(rng.gen_range(self.delay_ms.clone()));
        Some(ReplyTicket { id, delay })
    }

    /// Land a scheduled reply. Unknown or already delivered ids are ignored.
    pub fn deliver(&mut self, id: ReplyId) -> bool {
        if !self.pending.remove(&id) {
            return false;
        }
        self.push(Sender::Assistant, REPLY_TEXT.to_string());
        true
    }

    fn push(&mut self, sender: Sender, text: String) {
        let id = MessageId(self.next_message_id);
        self.next_message_id += 1;
        self.messages.push(Message {
            id,
            text,
            sender,
            timestamp: Local::now(),
        });
    }
}

/// Runs each reply ticket as its own timer task. A handle stays in the map
/// until its reply is delivered; nothing aborts them.
pub struct ReplyScheduler {
    tx: mpsc::UnboundedSender<AppEvent>,
    handles: HashMap<ReplyId, JoinHandle<()>>,
}

impl ReplyScheduler {
    pub fn new(tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            tx,
            handles: HashMap::new(),
        }
    }

    pub fn schedule(&mut self, ticket: ReplyTicket) {
        let tx = self.tx.clone();
        let ReplyTicket { id, delay } = ticket;
        tracing::debug!(?id, delay_ms = delay.as_millis() as u64, "scheduling scripted reply");

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver is gone only during shutdown.
            let _ = tx.send(AppEvent::ScriptedReply(id));
        });
        self.handles.insert(id, handle);
    }

    pub fn complete(&mut self, id: ReplyId) {
        self.handles.remove(&id);
    }

    pub fn in_flight(&self) -> usize {
        self.handles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn widget() -> ChatWidget {
        ChatWidget::new(500..=1500)
    }

    fn type_into(chat: &mut ChatWidget, s: &str) {
        for c in s.chars() {
            chat.input_mut().insert(c);
        }
    }

    #[test]
    fn test_first_mount_seeds_welcome_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = LocalStore::open(&path).unwrap();
        let mut first = widget();
        first.mount(&mut store);
        assert_eq!(first.messages().len(), 1);
        assert_eq!(first.messages()[0].sender, Sender::Assistant);
        assert_eq!(first.messages()[0].text, WELCOME_TEXT);

        let mut store = LocalStore::open(&path).unwrap();
        let mut second = widget();
        second.mount(&mut store);
        assert!(second.messages().is_empty());
    }

    #[test]
    fn test_panel_state_machine() {
        let mut chat = widget();
        assert_eq!(chat.panel(), ChatPanel::Closed);

        chat.toggle_minimize();
        assert_eq!(chat.panel(), ChatPanel::Closed);

        chat.open();
        assert!(chat.is_expanded());
        chat.toggle_minimize();
        assert_eq!(chat.panel(), ChatPanel::Open { minimized: true });
        chat.close();
        assert_eq!(chat.panel(), ChatPanel::Closed);

        chat.open();
        assert_eq!(chat.panel(), ChatPanel::Open { minimized: false });
    }

    #[test]
    fn test_submit_appends_and_composes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut chat = widget();
        type_into(&mut chat, "deploy staging");

        let ticket = chat.submit(&mut rng).unwrap();
        assert!(ticket.delay >= Duration::from_millis(500));
        assert!(ticket.delay <= Duration::from_millis(1500));
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].sender, Sender::User);
        assert_eq!(chat.messages()[0].text, "deploy staging");
        assert_eq!(chat.input().text(), "");
        assert!(chat.is_composing());

        assert!(chat.deliver(ticket.id));
        assert!(!chat.is_composing());
        assert_eq!(chat.messages()[1].text, REPLY_TEXT);
        assert!(!chat.deliver(ticket.id));
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut chat = widget();
        type_into(&mut chat, "   ");
        assert!(chat.submit(&mut rng).is_none());
        assert!(chat.messages().is_empty());
        assert!(!chat.is_composing());
        assert_eq!(chat.input().text(), "   ");
    }

    #[test]
    fn test_overlapping_replies_deliver_in_any_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut chat = widget();
        type_into(&mut chat, "one");
        let first = chat.submit(&mut rng).unwrap();
        type_into(&mut chat, "two");
        let second = chat.submit(&mut rng).unwrap();
        assert_eq!(chat.pending_replies(), 2);

        assert!(chat.deliver(second.id));
        assert!(chat.is_composing());
        assert!(chat.deliver(first.id));
        assert!(!chat.is_composing());

        let ids: Vec<MessageId> = chat.messages().iter().map(|m| m.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_reply_lands_while_closed() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut chat = widget();
        chat.open();
        type_into(&mut chat, "hello");
        let ticket = chat.submit(&mut rng).unwrap();
        chat.close();

        assert!(chat.deliver(ticket.id));
        assert_eq!(chat.messages().len(), 2);
        assert!(!chat.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = ReplyScheduler::new(tx);
        let id = ReplyId(0);
        scheduler.schedule(ReplyTicket {
            id,
            delay: Duration::from_millis(800),
        });
        assert_eq!(scheduler.in_flight(), 1);

        tokio::time::sleep(Duration::from_millis(799)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        match rx.recv().await {
            Some(AppEvent::ScriptedReply(got)) => assert_eq!(got, id),
            other => panic!("unexpected event: {other:?}"),
        }

        scheduler.complete(id);
        assert_eq!(scheduler.in_flight(), 0);
    }
}
