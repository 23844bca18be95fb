//! D&D Beyond implementation of the sheet service.
//!
//! Fetches the public character JSON and reduces it to a [`CharacterSheet`]:
//! base ability scores plus race/class score modifiers, hit points derived
//! from base HP, Constitution, and level.

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use crate::base::types::Res;

use super::{CharacterSheet, GenericSheetClient, SheetClient};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

// Extra methods on `SheetClient` applied by the D&D Beyond implementation.

impl SheetClient {
    /// Creates a sheet client backed by the D&D Beyond character API.
    pub fn dndbeyond() -> Res<Self> {
        Ok(Self::new(Arc::new(DndBeyondSheetClient::new()?)))
    }
}

// Structs.

/// Sheet client reading the public D&D Beyond character JSON endpoint.
pub struct DndBeyondSheetClient {
    client: reqwest::Client,
}

impl DndBeyondSheetClient {
    pub fn new() -> Res<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("dice-bot/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl GenericSheetClient for DndBeyondSheetClient {
    #[instrument(skip(self))]
    async fn fetch_player(&self, player_id: u64) -> Res<CharacterSheet> {
        let url = format!("https://www.dndbeyond.com/character/{player_id}/json");
        let record = self.client.get(&url).send().await?.error_for_status()?.json::<PlayerRecord>().await?;
        Ok(record.into())
    }
}

// Wire format, reduced to the fields the sheet needs.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub name: String,
    #[serde(default)]
    pub base_hit_points: i64,
    #[serde(default)]
    pub removed_hit_points: i64,
    #[serde(default)]
    pub stats: Vec<StatValue>,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub classes: Vec<PlayerClass>,
}

/// Ability scores arrive as (id, value) pairs; ids 1-6 are Str through Cha.
#[derive(Debug, Deserialize)]
pub struct StatValue {
    pub id: i64,
    #[serde(default)]
    pub value: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Modifiers {
    #[serde(default)]
    pub race: Vec<Modifier>,
    #[serde(default)]
    pub class: Vec<Modifier>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifier {
    #[serde(default)]
    pub sub_type: String,
    #[serde(default)]
    pub value: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerClass {
    #[serde(default)]
    pub level: i64,
    #[serde(default)]
    pub definition: PlayerClassDefinition,
}

#[derive(Debug, Deserialize, Default)]
pub struct PlayerClassDefinition {
    #[serde(default)]
    pub name: String,
}

impl From<PlayerRecord> for CharacterSheet {
    fn from(record: PlayerRecord) -> Self {
        let stats: HashMap<i64, i64> = record.stats.iter().map(|s| (s.id, s.value.unwrap_or_default())).collect();

        let (class, level) = record
            .classes
            .first()
            .map(|c| (c.definition.name.clone(), c.level))
            .unwrap_or_default();

        let mut sheet = CharacterSheet {
            player_name: record.name,
            class,
            level,
            current_hp: 0,
            total_hp: 0,
            strength: stats.get(&1).copied().unwrap_or_default(),
            dexterity: stats.get(&2).copied().unwrap_or_default(),
            constitution: stats.get(&3).copied().unwrap_or_default(),
            intelligence: stats.get(&4).copied().unwrap_or_default(),
            wisdom: stats.get(&5).copied().unwrap_or_default(),
            charisma: stats.get(&6).copied().unwrap_or_default(),
        };

        for modifier in record.modifiers.race.iter().chain(record.modifiers.class.iter()) {
            let value = modifier.value.unwrap_or_default();
            match modifier.sub_type.as_str() {
                "strength-score" => sheet.strength += value,
                "dexterity-score" => sheet.dexterity += value,
                "constitution-score" => sheet.constitution += value,
                "intelligence-score" => sheet.intelligence += value,
                "wisdom-score" => sheet.wisdom += value,
                "charisma-score" => sheet.charisma += value,
                _ => {}
            }
        }

        let hp = record.base_hit_points + (sheet.constitution - 10) / 2 * sheet.level;
        sheet.total_hp = hp;
        sheet.current_hp = hp - record.removed_hit_points;

        sheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_a_sheet_from_a_record() {
        let record = PlayerRecord {
            name: "Mora Vintner".to_string(),
            base_hit_points: 22,
            removed_hit_points: 9,
            stats: vec![
                StatValue { id: 1, value: Some(8) },
                StatValue { id: 2, value: Some(14) },
                StatValue { id: 3, value: Some(12) },
                StatValue { id: 4, value: Some(16) },
                StatValue { id: 5, value: Some(10) },
                StatValue { id: 6, value: Some(11) },
            ],
            modifiers: Modifiers {
                race: vec![Modifier {
                    sub_type: "intelligence-score".to_string(),
                    value: Some(2),
                }],
                class: vec![Modifier {
                    sub_type: "spellcasting".to_string(),
                    value: Some(1),
                }],
            },
            classes: vec![PlayerClass {
                level: 5,
                definition: PlayerClassDefinition {
                    name: "Wizard".to_string(),
                },
            }],
        };

        let sheet = CharacterSheet::from(record);

        assert_eq!(sheet.player_name, "Mora Vintner");
        assert_eq!(sheet.class, "Wizard");
        assert_eq!(sheet.level, 5);
        assert_eq!(sheet.intelligence, 18);
        assert_eq!(sheet.strength, 8);
        // 22 base + Con modifier (+1) per level.
        assert_eq!(sheet.total_hp, 27);
        assert_eq!(sheet.current_hp, 18);
    }

    #[test]
    fn tolerates_a_sparse_record() {
        let record: PlayerRecord = serde_json::from_str(r#"{"name": "Nobody"}"#).unwrap();
        let sheet = CharacterSheet::from(record);

        assert_eq!(sheet.player_name, "Nobody");
        assert_eq!(sheet.class, "");
        assert_eq!(sheet.level, 0);
        assert_eq!(sheet.total_hp, 0);
    }

    #[test]
    fn null_stat_values_read_as_zero() {
        let record: PlayerRecord = serde_json::from_str(r#"{"name": "Nobody", "stats": [{"id": 1, "value": null}]}"#).unwrap();
        let sheet = CharacterSheet::from(record);

        assert_eq!(sheet.strength, 0);
    }
}
