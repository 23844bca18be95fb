use tracing::{Instrument, error, instrument};

use crate::{
    base::types::{InboundEvent, Void},
    responder::Dispatcher,
    service::chat::ChatClient,
};

/// Handles one inbound chat event.
///
/// Spawns a task per event, so a slow or failing responder for one event
/// cannot block delivery of others. Dispatch is fire-and-forget; errors are
/// logged here and never propagate to the transport.
#[instrument(skip_all)]
pub fn handle_chat_event(event: InboundEvent, channel_id: String, dispatcher: Dispatcher, chat: ChatClient) {
    tokio::spawn(async move {
        // Process the event.
        let result = handle_chat_event_internal(event, channel_id, &dispatcher, &chat).in_current_span().await;

        // Log any errors.
        if let Err(err) = &result {
            error!("Error while handling: {}", err);
        }
    });
}

#[instrument(skip_all)]
async fn handle_chat_event_internal(event: InboundEvent, channel_id: String, dispatcher: &Dispatcher, chat: &ChatClient) -> Void {
    dispatcher.dispatch(&event, &channel_id, chat).await
}
