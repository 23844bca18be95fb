//! Runtime services and shared state for the dice-bot.

use std::sync::Arc;

use tracing::instrument;

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    history::HistoryStore,
    responder::{Dispatcher, Responder, history::HistoryResponder, roll::RollResponder, sheet::SheetResponder},
    roll::RollLimits,
    service::{chat::ChatClient, sheet::SheetClient},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the configuration, the shared response history, the
/// responder registry, and the chat client. It is designed to be trivially
/// cloneable, allowing it to be passed around without the need for `Arc` or
/// `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The shared response history.
    pub history: HistoryStore,
    /// The responder registry and dispatch loop.
    pub dispatcher: Dispatcher,
    /// The slack client instance.
    pub chat: ChatClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub async fn new(config: Config) -> Res<Self> {
        // Initialize the history store.
        let history = HistoryStore::new(config.history_capacity, config.max_history_results);

        // Register the responders, in dispatch order.
        let limits = RollLimits::from(&config);
        let mut responders: Vec<Arc<dyn Responder>> = vec![
            Arc::new(RollResponder::new(limits)),
            Arc::new(HistoryResponder::new("history", 10, history.clone())),
            Arc::new(HistoryResponder::new("latest", 1, history.clone())),
        ];

        if !config.player_ids.is_empty() {
            let sheets = SheetClient::dndbeyond()?;
            responders.push(Arc::new(SheetResponder::new(sheets, &config.player_ids).await?));
        }

        let dispatcher = Dispatcher::new(history.clone(), responders);

        // Initialize the slack client.
        let chat = ChatClient::slack(&config, dispatcher.clone()).await?;

        Ok(Self {
            config,
            history,
            dispatcher,
            chat,
        })
    }

    pub async fn start(&self) -> Void {
        self.chat.start().await
    }
}
