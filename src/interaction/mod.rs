//! Event handling and user interactions for the dice-bot.
//!
//! Inbound chat messages are handed off here by the transport and fanned
//! out to the responders via the dispatcher.

pub mod chat_event;
