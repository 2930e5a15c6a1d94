//! POOP: a sarcastic keyword chatbot and a client for the $POOP token faucet.

pub mod config;
pub mod faucet;
pub mod logging;
pub mod responder;
pub mod terminal;

pub use config::{Config, ConfigError};
pub use responder::{Intent, Responder, ResponderError};
pub use terminal::{Message, MessageKind, SubmitError, Terminal};
