use crate::model::config::YardConfig;
use crate::model::economy::{CurrencyLedger, UnlockRegistry};
use crate::model::simulation::Simulation;
use crate::model::species::Species;
use crate::model::state::Creature;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),
}

/// Injected storage capability. The app wires in [`FileStorage`]; tests
/// substitute [`MemoryStorage`].
pub trait Storage {
    /// Returns the previously saved blob, or `None` when there is none.
    fn load(&self) -> Option<String>;
    fn save(&mut self, blob: &str) -> Result<(), StorageError>;
}

pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn save(&mut self, blob: &str) -> Result<(), StorageError> {
        fs::write(&self.path, blob)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    pub blob: Option<String>,
}

impl Storage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.blob.clone()
    }

    fn save(&mut self, blob: &str) -> Result<(), StorageError> {
        self.blob = Some(blob.to_string());
        Ok(())
    }
}

/// Persisted blob. Every section and field carries its documented default
/// so a partial save still restores; an unparsable blob is discarded
/// wholesale and replaced by `SaveState::default()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveState {
    #[serde(default)]
    pub currency: CurrencySave,
    #[serde(default)]
    pub unlocks: UnlockSave,
    #[serde(default)]
    pub insects: Vec<InsectRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencySave {
    #[serde(default)]
    pub coins: u64,
    #[serde(default)]
    pub gems: u64,
    #[serde(default)]
    pub total_earned: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockSave {
    #[serde(default = "default_owned_species")]
    pub unlocked_species: Vec<String>,
    #[serde(default = "default_slots")]
    pub unlocked_slots: usize,
    #[serde(default = "default_species_levels")]
    pub species_levels: HashMap<String, u32>,
}

fn default_owned_species() -> Vec<String> {
    vec!["beetle".to_string()]
}

fn default_slots() -> usize {
    1
}

fn default_species_levels() -> HashMap<String, u32> {
    HashMap::from([("beetle".to_string(), 1)])
}

impl Default for UnlockSave {
    fn default() -> Self {
        Self {
            unlocked_species: default_owned_species(),
            unlocked_slots: default_slots(),
            species_levels: default_species_levels(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsectRecord {
    #[serde(rename = "type")]
    pub species: String,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub experience: f64,
}

fn default_level() -> u32 {
    1
}

impl Simulation {
    /// Point-in-time snapshot of everything the save contract covers.
    pub fn snapshot(&self) -> SaveState {
        SaveState {
            currency: CurrencySave {
                coins: self.ledger.coins,
                gems: self.ledger.gems,
                total_earned: self.ledger.total_earned,
            },
            unlocks: UnlockSave {
                unlocked_species: self
                    .unlocks
                    .owned_species()
                    .iter()
                    .map(|s| s.name().to_string())
                    .collect(),
                unlocked_slots: self.unlocks.owned_slots,
                species_levels: self
                    .unlocks
                    .species_levels()
                    .iter()
                    .map(|(s, &level)| (s.name().to_string(), level))
                    .collect(),
            },
            insects: self
                .creatures
                .iter()
                .map(|c| InsectRecord {
                    species: c.species.name().to_string(),
                    x: c.x,
                    y: c.y,
                    level: c.level,
                    experience: c.experience,
                })
                .collect(),
        }
    }

    pub fn serialize(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    /// Rebuilds a simulation from a stored blob. A missing or unparsable
    /// blob falls back to full defaults; a valid blob with bad pieces
    /// (unknown species, broken invariants) drops only those pieces.
    pub fn restore(
        yard: YardConfig,
        blob: Option<&str>,
        now_ms: i64,
        rng: &mut impl Rng,
    ) -> Simulation {
        let state = match blob {
            Some(raw) => match serde_json::from_str::<SaveState>(raw) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!("Corrupt save discarded, starting fresh: {e}");
                    SaveState::default()
                }
            },
            None => SaveState::default(),
        };
        Simulation::from_save(yard, state, now_ms, rng)
    }

    pub fn from_save(
        yard: YardConfig,
        state: SaveState,
        now_ms: i64,
        rng: &mut impl Rng,
    ) -> Simulation {
        let owned: Vec<Species> = state
            .unlocks
            .unlocked_species
            .iter()
            .filter_map(|tag| {
                let parsed = Species::from_tag(tag);
                if parsed.is_none() {
                    tracing::warn!(tag = %tag, "unknown species in save, skipped");
                }
                parsed
            })
            .collect();
        let levels: HashMap<Species, u32> = state
            .unlocks
            .species_levels
            .iter()
            .filter_map(|(tag, &level)| Species::from_tag(tag).map(|s| (s, level)))
            .collect();
        let unlocks = UnlockRegistry::from_parts(owned, state.unlocks.unlocked_slots, levels);

        let mut ledger = CurrencyLedger::new(now_ms);
        ledger.coins = state.currency.coins;
        ledger.gems = state.currency.gems;
        ledger.total_earned = state.currency.total_earned;

        let mut creatures: Vec<Creature> = state
            .insects
            .iter()
            .filter_map(|record| {
                let species = Species::from_tag(&record.species);
                if species.is_none() {
                    tracing::warn!(tag = %record.species, "unknown insect in save, skipped");
                }
                species.map(|s| {
                    Creature::with_progress(s, record.x, record.y, record.level, record.experience, rng)
                })
            })
            .collect();
        // the roster is bounded by slot capacity even in a hand-edited save
        if creatures.len() > unlocks.owned_slots {
            tracing::warn!(
                kept = unlocks.owned_slots,
                dropped = creatures.len() - unlocks.owned_slots,
                "save held more insects than slots"
            );
            creatures.truncate(unlocks.owned_slots);
        }

        let mut sim = Simulation {
            creatures,
            food: Vec::new(),
            ledger,
            unlocks,
            yard,
            ticks: 0,
        };
        sim.populate_missing(rng);
        sim
    }
}
