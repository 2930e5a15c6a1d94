//! Chat transcript around the [`Responder`].
//!
//! The terminal accepts one user line at a time. While a reply is pending
//! ("typing") further input is refused; the caller waits out the typing delay
//! and then calls [`Terminal::complete`].

use crate::config::TerminalConfig;
use crate::responder::{uniform_index, Cleaner, Responder};
use chrono::{DateTime, Local, Utc};
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

pub const BOOT_MESSAGES: &[(MessageKind, &str)] = &[
    (MessageKind::System, "POOP v1.0 (Proof of Operational Poop) initialized..."),
    (
        MessageKind::System,
        "WARNING: This AI has attitude problems. Proceed at your own risk.",
    ),
    (
        MessageKind::Ai,
        "System ready. Ask me anything and regret it immediately.",
    ),
];

/// Lines that close the terminal once their reply has been shown.
pub const EXIT_COMMANDS: &[&str] = &["exit", "quit"];

pub fn is_exit_command(input: &str) -> bool {
    Cleaner::normalize(input).is_some_and(|line| EXIT_COMMANDS.contains(&line.as_str()))
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    System,
    Ai,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Message {
    pub id: Uuid,
    pub kind: MessageKind,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Local wall-clock time, 24-hour `HH:MM:SS`.
    pub fn clock_label(&self) -> String {
        self.timestamp.with_timezone(&Local).format("%H:%M:%S").to_string()
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Input is empty")]
    Blank,
    #[error("Still typing a reply")]
    Busy,
}

pub struct Terminal<R: RngCore = OsRng> {
    responder: Responder<R>,
    config: TerminalConfig,
    messages: Vec<Message>,
    pending: Option<String>,
}

impl<R: RngCore> Terminal<R> {
    pub fn new(responder: Responder<R>, config: TerminalConfig) -> Self {
        let messages = BOOT_MESSAGES
            .iter()
            .map(|(kind, text)| Message::new(*kind, *text))
            .collect();
        Self {
            responder,
            config,
            messages,
            pending: None,
        }
    }

    /// Records a user line and returns how long to "type" before completing.
    pub fn submit(&mut self, input: &str) -> Result<Duration, SubmitError> {
        if input.trim().is_empty() {
            return Err(SubmitError::Blank);
        }
        if self.pending.is_some() {
            return Err(SubmitError::Busy);
        }
        self.messages.push(Message::new(MessageKind::User, input));
        self.pending = Some(input.to_string());
        Ok(self.typing_delay())
    }

    /// Appends the reply to the pending input. `None` when nothing is pending.
    pub fn complete(&mut self) -> Option<&Message> {
        let input = self.pending.take()?;
        let reply = self.responder.respond(&input);
        self.messages.push(Message::new(MessageKind::Ai, reply));
        self.messages.last()
    }

    pub fn typing_delay(&mut self) -> Duration {
        let min = self.config.typing_min_ms;
        let span = self.config.typing_max_ms.saturating_sub(min).max(1);
        let jitter = uniform_index(self.responder.rng_mut(), span as usize) as u64;
        Duration::from_millis(min + jitter)
    }

    pub fn is_typing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::{Intent, FALLBACK};
    use rand_core::impls;

    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            impls::fill_bytes_via_next(self, dest)
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn terminal() -> Terminal<ZeroRng> {
        Terminal::new(Responder::with_rng(ZeroRng).unwrap(), TerminalConfig::default())
    }

    #[test]
    fn boots_with_banner() {
        let terminal = terminal();
        let kinds: Vec<MessageKind> = terminal.messages().iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![MessageKind::System, MessageKind::System, MessageKind::Ai]);
        assert!(!terminal.is_typing());
    }

    #[test]
    fn submit_then_complete_appends_a_reply() {
        let mut terminal = terminal();
        let delay = terminal.submit("  Hello POOP ").unwrap();
        assert_eq!(delay, Duration::from_millis(500));
        assert!(terminal.is_typing());

        let user = &terminal.messages()[3];
        assert_eq!(user.kind, MessageKind::User);
        assert_eq!(user.text, "  Hello POOP ");

        let probe = Responder::with_rng(ZeroRng).unwrap();
        let greeting = probe.pool(Some(Intent::Greeting));
        let reply = terminal.complete().unwrap().clone();
        assert_eq!(reply.kind, MessageKind::Ai);
        assert!(greeting.contains(&reply.text.as_str()));
        assert!(!terminal.is_typing());
        assert_eq!(terminal.messages().len(), 5);
    }

    #[test]
    fn blank_and_busy_input_is_refused() {
        let mut terminal = terminal();
        assert_eq!(terminal.submit("   "), Err(SubmitError::Blank));
        terminal.submit("zzz").unwrap();
        assert_eq!(terminal.submit("again"), Err(SubmitError::Busy));
        assert_eq!(terminal.messages().len(), 4);

        let reply = terminal.complete().unwrap();
        assert!(FALLBACK.contains(&reply.text.as_str()));
        assert!(terminal.complete().is_none());
    }

    #[test]
    fn exit_commands_still_get_a_farewell() {
        assert!(is_exit_command("  QUIT "));
        assert!(is_exit_command("exit"));
        assert!(!is_exit_command("exit strategy"));
        assert!(!is_exit_command("   "));

        let mut terminal = terminal();
        let farewells = Responder::with_rng(ZeroRng).unwrap().pool(Some(Intent::Farewell));
        for line in EXIT_COMMANDS {
            terminal.submit(line).unwrap();
            let reply = terminal.complete().unwrap();
            assert!(farewells.contains(&reply.text.as_str()), "{:?}", line);
        }
    }

    #[test]
    fn typing_delay_stays_in_range() {
        let mut terminal = terminal();
        for _ in 0..10 {
            let delay = terminal.typing_delay();
            assert!(delay >= Duration::from_millis(500));
            assert!(delay < Duration::from_millis(1500));
        }
    }

    #[test]
    fn message_ids_are_unique() {
        let terminal = terminal();
        let ids: std::collections::HashSet<Uuid> =
            terminal.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), terminal.messages().len());
        assert_eq!(terminal.messages()[0].clock_label().len(), 8);
    }
}
