//! Character-sheet fetching.
//!
//! The sheet responder consumes this as a black-box capability: given a
//! player ID, produce a display-ready character sheet.

pub mod dndbeyond;

use std::{fmt, ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::Res;

// Traits.

/// Generic character-sheet source that clients must implement.
#[async_trait]
pub trait GenericSheetClient: Send + Sync + 'static {
    /// Fetches the current sheet for a player.
    async fn fetch_player(&self, player_id: u64) -> Res<CharacterSheet>;
}

// Structs.

/// Sheet client handle for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct SheetClient {
    inner: Arc<dyn GenericSheetClient>,
}

impl Deref for SheetClient {
    type Target = dyn GenericSheetClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl SheetClient {
    pub fn new(inner: Arc<dyn GenericSheetClient>) -> Self {
        Self { inner }
    }
}

/// A derived, display-ready character sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSheet {
    pub player_name: String,
    pub class: String,
    pub level: i64,
    pub current_hp: i64,
    pub total_hp: i64,
    pub strength: i64,
    pub dexterity: i64,
    pub constitution: i64,
    pub intelligence: i64,
    pub wisdom: i64,
    pub charisma: i64,
}

/// Ability modifier for a score, rounding toward negative infinity.
pub fn ability_modifier(score: i64) -> i64 {
    let base = score - 10;
    if base >= 0 { base / 2 } else { (base - 1) / 2 }
}

fn fmt_score(score: i64) -> String {
    format!("{}(**{:+}**)", score, ability_modifier(score))
}

impl fmt::Display for CharacterSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "**{}:** Level {} {}, {}/{} HP\nStr:{} Dex:{} Con:{} Int:{} Wis:{} Cha:{}",
            self.player_name,
            self.level,
            self.class,
            self.current_hp,
            self.total_hp,
            fmt_score(self.strength),
            fmt_score(self.dexterity),
            fmt_score(self.constitution),
            fmt_score(self.intelligence),
            fmt_score(self.wisdom),
            fmt_score(self.charisma),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ability_modifiers_round_toward_negative_infinity() {
        assert_eq!(ability_modifier(20), 5);
        assert_eq!(ability_modifier(14), 2);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(7), -2);
    }

    #[test]
    fn sheet_rendering() {
        let sheet = CharacterSheet {
            player_name: "Mora Vintner".to_string(),
            class: "Wizard".to_string(),
            level: 5,
            current_hp: 18,
            total_hp: 27,
            strength: 8,
            dexterity: 14,
            constitution: 12,
            intelligence: 18,
            wisdom: 10,
            charisma: 11,
        };

        let text = sheet.to_string();
        assert!(text.starts_with("**Mora Vintner:** Level 5 Wizard, 18/27 HP"));
        assert!(text.contains("Str:8(**-1**)"));
        assert!(text.contains("Int:18(**+4**)"));
    }
}
