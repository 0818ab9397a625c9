//! Durable player progress
//!
//! Accumulates finished-run results into total coins and best score, and
//! gates the cosmetic skin shop. The engine only produces `RunResult`
//! values; the host owns the actual storage and feeds the JSON blob back
//! through `from_json` on startup.

use serde::{Deserialize, Serialize};

use crate::sim::RunResult;

/// Cosmetic rabbit skins. No gameplay effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Skin {
    #[default]
    Classic,
    Wizard,
    Space,
    Sport,
}

impl Skin {
    pub const ALL: [Skin; 4] = [Skin::Classic, Skin::Wizard, Skin::Space, Skin::Sport];

    pub fn title(self) -> &'static str {
        match self {
            Skin::Classic => "Classic",
            Skin::Wizard => "Wizard",
            Skin::Space => "Space",
            Skin::Sport => "Sport",
        }
    }

    /// Shop price in coins
    pub fn price(self) -> u32 {
        match self {
            Skin::Classic => 0,
            Skin::Wizard => 75,
            Skin::Space => 125,
            Skin::Sport => 200,
        }
    }
}

/// Accumulated player progress across runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub coins: u32,
    pub best_score: u32,
    pub selected_skin: Skin,
    pub owned_skins: Vec<Skin>,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            coins: 0,
            best_score: 0,
            selected_skin: Skin::Classic,
            owned_skins: vec![Skin::Classic],
        }
    }
}

impl PlayerProgress {
    /// Suggested storage key for the host
    pub const STORAGE_KEY: &'static str = "carrot_toss_progress";

    /// Fold one finished run into the totals
    pub fn record_finished_run(&mut self, result: RunResult) {
        self.coins = self.coins.saturating_add(result.coins);
        self.best_score = self.best_score.max(result.score);
    }

    pub fn owns(&self, skin: Skin) -> bool {
        self.owned_skins.contains(&skin)
    }

    /// Select an owned skin. Unowned selections are refused.
    pub fn select_skin(&mut self, skin: Skin) -> bool {
        if !self.owns(skin) {
            return false;
        }
        self.selected_skin = skin;
        true
    }

    /// Buy and select a skin if affordable and not already owned
    pub fn buy_skin(&mut self, skin: Skin) -> bool {
        if self.owns(skin) || self.coins < skin.price() {
            return false;
        }
        self.coins -= skin.price();
        self.owned_skins.push(skin);
        self.selected_skin = skin;
        true
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut progress: Self = serde_json::from_str(json)?;
        // Classic is always owned, and the selection must be owned
        if !progress.owns(Skin::Classic) {
            progress.owned_skins.insert(0, Skin::Classic);
        }
        if !progress.owns(progress.selected_skin) {
            progress.selected_skin = Skin::Classic;
        }
        Ok(progress)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_finished_run_accumulates() {
        let mut progress = PlayerProgress::default();
        progress.record_finished_run(RunResult { score: 12, coins: 7 });
        progress.record_finished_run(RunResult { score: 8, coins: 3 });
        assert_eq!(progress.coins, 10);
        assert_eq!(progress.best_score, 12);
    }

    #[test]
    fn test_buy_skin_requires_coins() {
        let mut progress = PlayerProgress::default();
        assert!(!progress.buy_skin(Skin::Wizard));
        progress.coins = 100;
        assert!(progress.buy_skin(Skin::Wizard));
        assert_eq!(progress.coins, 25);
        assert_eq!(progress.selected_skin, Skin::Wizard);
        // Buying twice is refused
        assert!(!progress.buy_skin(Skin::Wizard));
    }

    #[test]
    fn test_select_skin_requires_ownership() {
        let mut progress = PlayerProgress::default();
        assert!(!progress.select_skin(Skin::Sport));
        assert_eq!(progress.selected_skin, Skin::Classic);
        assert!(progress.select_skin(Skin::Classic));
    }

    #[test]
    fn test_json_round_trip() {
        let mut progress = PlayerProgress::default();
        progress.coins = 150;
        progress.buy_skin(Skin::Wizard);
        let json = progress.to_json().unwrap();
        let back = PlayerProgress::from_json(&json).unwrap();
        assert_eq!(progress, back);
    }

    #[test]
    fn test_from_json_repairs_invalid_selection() {
        let json = r#"{"coins":0,"best_score":0,"selected_skin":"Sport","owned_skins":[]}"#;
        let progress = PlayerProgress::from_json(json).unwrap();
        assert_eq!(progress.selected_skin, Skin::Classic);
        assert!(progress.owns(Skin::Classic));
    }
}
