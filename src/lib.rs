//! Library root for `dice-bot`.
//!
//! Dice-bot is a Slack bot for TTRPG channels designed to:
//! - Roll dice expressions spoken anywhere in a message ("3d6+2")
//! - Replay recent rolls per player via `!history` and `!latest`
//! - Serve character sheets fetched from D&D Beyond via `!who`
//!
//! The bot integrates with Slack for chat and keeps a bounded in-memory log
//! of its own responses. The architecture is built around an extensible
//! responder trait: each feature decides for itself whether an inbound
//! message applies to it, and several responders may reply to the same
//! message.

#[deny(missing_docs)]
pub mod base;
pub mod history;
pub mod interaction;
pub mod prelude;
pub mod responder;
pub mod roll;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the dice-bot runtime:
/// - Initializes the crypto provider
/// - Wires the history store, responders, and chat client
/// - Starts the socket-mode event loop for processing messages
pub async fn start(config: Config) -> Void {
    info!("Starting dice-bot ...");

    // Start the crypto provider.
    crypto::ring::default_provider().install_default().unwrap();

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config).await?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
