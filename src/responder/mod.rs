//! The responder contract and the event-dispatch loop.
//!
//! Each feature of the bot is a [`Responder`]: a unit that decides for
//! itself whether an inbound message applies to it and, if so, produces a
//! response. The [`Dispatcher`] offers every event to every registered
//! responder in registration order; more than one may reply to the same
//! message, and a failing responder never blocks the rest.

pub mod history;
pub mod roll;
pub mod sheet;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, info, instrument};

use crate::{
    base::types::{InboundEvent, Res, Response, Void},
    history::{HistoryEntry, HistoryStore},
    service::chat::ChatClient,
};

/// A pluggable unit that conditionally reacts to an inbound message.
#[async_trait]
pub trait Responder: Send + Sync + 'static {
    /// The name this responder's history entries are recorded under.
    fn name(&self) -> &str;

    /// Whether this responder wants to reply to the event. Called for every
    /// registered responder on every event, so keep it cheap.
    fn applies(&self, event: &InboundEvent) -> bool;

    /// Produces the reply for an event that `applies` accepted.
    async fn respond(&self, event: &InboundEvent) -> Res<Response>;
}

/// Ordered registry of responders plus the shared response history.
///
/// Trivially cloneable; clones share the registry and the history log.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<DispatcherInner>,
}

struct DispatcherInner {
    responders: Vec<Arc<dyn Responder>>,
    history: HistoryStore,
}

impl Dispatcher {
    pub fn new(history: HistoryStore, responders: Vec<Arc<dyn Responder>>) -> Self {
        Self {
            inner: Arc::new(DispatcherInner { responders, history }),
        }
    }

    /// The shared response history.
    pub fn history(&self) -> &HistoryStore {
        &self.inner.history
    }

    /// Offers the event to every registered responder and sends whatever
    /// they produce.
    ///
    /// There is no early exit after the first match. A failing responder or
    /// a failed send suppresses that one reply and dispatch continues; a
    /// reply is recorded to history only after it was successfully sent, so
    /// the log stays consistent with what users actually saw.
    #[instrument(skip_all)]
    pub async fn dispatch(&self, event: &InboundEvent, channel_id: &str, chat: &ChatClient) -> Void {
        // Don't reply to yourself.
        if event.speaker.id == chat.bot_user_id() {
            return Ok(());
        }

        for responder in &self.inner.responders {
            if !responder.applies(event) {
                continue;
            }

            let response = match responder.respond(event).await {
                Ok(response) => response,
                Err(err) => {
                    error!("Responder {} failed: {}", responder.name(), err);
                    continue;
                }
            };

            let text = if response.mention_speaker {
                format!("{} {}", event.speaker.mention(), response.text)
            } else {
                response.text.clone()
            };

            if let Err(err) = chat.send_message(channel_id, &text).await {
                error!("Failed to send response from {}: {}", responder.name(), err);
                continue;
            }

            self.inner.history.append(HistoryEntry {
                responder_name: responder.name().to_string(),
                response,
                timestamp: Utc::now(),
                addressee: event.speaker.clone(),
            });

            info!("Sent response from {}.", responder.name());
        }

        Ok(())
    }
}
