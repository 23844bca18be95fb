//! The `!who` character-sheet responder.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use crate::{
    base::types::{InboundEvent, Res, Response},
    service::sheet::{CharacterSheet, SheetClient},
};

use super::Responder;

/// Serves character sheets for the configured players on `!who <name>`.
///
/// Sheets are fetched once at startup and refreshed on each request; when a
/// refresh fails the cached sheet is served with a warning line.
pub struct SheetResponder {
    client: SheetClient,
    /// Lowercased first names, sorted, for matching against messages. The
    /// cached sheets keep the properly capitalized form.
    names: Vec<String>,
    name_to_id: HashMap<String, u64>,
    sheets: Mutex<HashMap<u64, CharacterSheet>>,
}

impl SheetResponder {
    /// Prefetches a sheet for every configured player; fails if any initial
    /// fetch fails so a misconfigured ID is caught at startup.
    pub async fn new(client: SheetClient, player_ids: &[u64]) -> Res<Self> {
        let mut names = Vec::new();
        let mut name_to_id = HashMap::new();
        let mut sheets = HashMap::new();

        for &id in player_ids {
            let sheet = client.fetch_player(id).await?;
            let first_name = sheet.player_name.split_whitespace().next().unwrap_or_default().to_lowercase();
            if first_name.is_empty() {
                anyhow::bail!("Player {} has an empty name.", id);
            }
            names.push(first_name.clone());
            name_to_id.insert(first_name, id);
            sheets.insert(id, sheet);
        }
        names.sort();

        Ok(Self {
            client,
            names,
            name_to_id,
            sheets: Mutex::new(sheets),
        })
    }
}

#[async_trait]
impl Responder for SheetResponder {
    fn name(&self) -> &str {
        "sheet"
    }

    fn applies(&self, event: &InboundEvent) -> bool {
        if !event.text.starts_with("!who") {
            return false;
        }
        let lowered = event.text.to_lowercase();
        self.names.iter().any(|name| lowered.contains(name.as_str()))
    }

    async fn respond(&self, event: &InboundEvent) -> Res<Response> {
        let lowered = event.text.to_lowercase();
        let mut lines = Vec::new();

        for name in &self.names {
            if !lowered.contains(name.as_str()) {
                continue;
            }
            let Some(&id) = self.name_to_id.get(name) else {
                continue;
            };

            match self.client.fetch_player(id).await {
                Ok(sheet) => {
                    self.sheets.lock().await.insert(id, sheet);
                }
                Err(err) => {
                    warn!("Failed to refresh character sheet for {}: {}", name, err);
                    lines.push(format!("**failed to update character sheet for {name}, using cached version**"));
                }
            }

            if let Some(sheet) = self.sheets.lock().await.get(&id) {
                lines.push(sheet.to_string());
            }
        }

        Ok(Response::text(lines.join("\n")))
    }
}
