//! Responders that replay past roll responses on request.

use async_trait::async_trait;

use crate::{
    base::types::{InboundEvent, Res, Response, Speaker},
    history::{HistoryEntry, HistoryQuery, HistoryStore},
};

use super::Responder;

/// How many roll entries one query pulls from the store before grouping.
const FETCH_LIMIT: usize = 100;

/// Replays recent roll responses, grouped per addressee.
///
/// Registered twice: as "history" showing several entries per player and as
/// "latest" showing one.
pub struct HistoryResponder {
    hotword: String,
    prefix: String,
    max_entries: usize,
    history: HistoryStore,
}

impl HistoryResponder {
    pub fn new(hotword: &str, max_entries: usize, history: HistoryStore) -> Self {
        Self {
            hotword: hotword.to_string(),
            prefix: format!("!{hotword}"),
            max_entries,
            history,
        }
    }
}

#[async_trait]
impl Responder for HistoryResponder {
    fn name(&self) -> &str {
        &self.hotword
    }

    fn applies(&self, event: &InboundEvent) -> bool {
        event.text.starts_with(&self.prefix)
    }

    async fn respond(&self, _event: &InboundEvent) -> Res<Response> {
        let entries = self.history.query(&HistoryQuery::for_responder("roll"), FETCH_LIMIT);
        Ok(Response::text(render_history(&entries, self.max_entries)))
    }
}

/// Renders newest-first roll entries grouped per addressee.
///
/// Addressees are ordered by display name to escape nondeterministic
/// iteration order; entries within a group keep the newest-first order they
/// arrived in.
fn render_history(entries: &[HistoryEntry], max_entries: usize) -> String {
    if entries.is_empty() {
        return "History of what?".to_string();
    }

    let mut groups: Vec<(&Speaker, Vec<&HistoryEntry>)> = Vec::new();
    for entry in entries {
        match groups.iter_mut().find(|(speaker, _)| speaker.id == entry.addressee.id) {
            Some((_, list)) => list.push(entry),
            None => groups.push((&entry.addressee, vec![entry])),
        }
    }
    groups.sort_by(|(a, _), (b, _)| a.display_name.cmp(&b.display_name));

    let header = if max_entries > 1 {
        "**Roll History (newest --> oldest)**"
    } else {
        "**Latest Rolls**"
    };

    let mut lines = vec![header.to_string()];
    for (speaker, list) in &groups {
        let shown: Vec<&str> = list.iter().take(max_entries).map(|e| e.response.text.as_str()).collect();
        lines.push(format!("{} [{}]", speaker.mention(), shown.join("] [")));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn speaker(id: &str, name: &str) -> Speaker {
        Speaker {
            id: id.to_string(),
            display_name: name.to_string(),
        }
    }

    fn entry(speaker: Speaker, text: &str) -> HistoryEntry {
        HistoryEntry {
            responder_name: "roll".to_string(),
            response: Response::text(text),
            timestamp: Utc::now(),
            addressee: speaker,
        }
    }

    #[test]
    fn empty_history_asks_what() {
        assert_eq!(render_history(&[], 10), "History of what?");
    }

    #[test]
    fn groups_per_addressee_sorted_by_display_name() {
        // Newest first, as the store returns them.
        let entries = vec![
            entry(speaker("U2", "zoe"), "d20->**20 (Crit!)**"),
            entry(speaker("U1", "ada"), "d6->**3**"),
            entry(speaker("U2", "zoe"), "d20->**4**"),
        ];

        let text = render_history(&entries, 10);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "**Roll History (newest --> oldest)**");
        assert_eq!(lines[1], "<@U1> [d6->**3**]");
        assert_eq!(lines[2], "<@U2> [d20->**20 (Crit!)**] [d20->**4**]");
    }

    #[test]
    fn latest_shows_one_entry_per_addressee() {
        let entries = vec![
            entry(speaker("U1", "ada"), "newest"),
            entry(speaker("U1", "ada"), "older"),
        ];

        let text = render_history(&entries, 1);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "**Latest Rolls**");
        assert_eq!(lines[1], "<@U1> [newest]");
    }

    #[tokio::test]
    async fn responds_from_the_shared_store() {
        let store = HistoryStore::new(10, 10);
        store.append(entry(speaker("U1", "ada"), "d6->**3**"));

        let responder = HistoryResponder::new("history", 10, store);
        let event = InboundEvent {
            speaker: speaker("U1", "ada"),
            text: "!history".to_string(),
        };

        assert!(responder.applies(&event));
        let response = responder.respond(&event).await.unwrap();
        assert!(response.text.contains("<@U1> [d6->**3**]"));
        assert!(!response.mention_speaker);
    }

    #[test]
    fn applies_only_to_its_hotword() {
        let store = HistoryStore::new(10, 10);
        let responder = HistoryResponder::new("latest", 1, store);

        let matching = InboundEvent {
            speaker: speaker("U1", "ada"),
            text: "!latest".to_string(),
        };
        let other = InboundEvent {
            speaker: speaker("U1", "ada"),
            text: "!history".to_string(),
        };

        assert!(responder.applies(&matching));
        assert!(!responder.applies(&other));
    }
}
