//! Personal best score
//!
//! A single integer persisted to LocalStorage, loaded once at startup and
//! written back only when a run beats it.

use serde::{Deserialize, Serialize};

/// Best score across all runs on this browser/profile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct BestScore {
    pub score: u64,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bullet_dodger_best";

    pub fn new(score: u64) -> Self {
        Self { score }
    }

    /// Record `score` if it beats the stored best. Returns true on update.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.score {
            self.score = score;
            return true;
        }
        false
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(score) = raw.parse::<u64>() {
                    log::info!("Loaded best score: {}", score);
                    return Self { score };
                }
            }
        }

        log::info!("No best score found, starting fresh");
        Self::default()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.score.to_string());
            log::info!("Best score saved: {}", self.score);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_updates_only_on_improvement() {
        let mut best = BestScore::new(100);
        assert!(!best.record(50));
        assert_eq!(best.score, 100);
        assert!(!best.record(100));
        assert!(best.record(101));
        assert_eq!(best.score, 101);
    }
}
