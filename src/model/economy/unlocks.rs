use crate::model::economy::ledger::CurrencyLedger;
use crate::model::species::Species;
use std::collections::HashMap;

pub const MAX_SPECIES_LEVEL: u32 = 10;

/// Slot cost tiers. `unlock_slot` charges `SLOT_COSTS[owned + 1]` and
/// `can_unlock_slot` requires `owned < len - 1`, so the first two entries
/// are never charged and the final tier is unreachable.
pub const SLOT_COSTS: [u64; 6] = [0, 0, 50, 150, 400, 1000];

/// One canonical cost table per concept. Beetle has no entry: it is owned
/// from creation and can never be re-purchased.
pub fn unlock_cost(species: Species) -> Option<u64> {
    match species {
        Species::Beetle => None,
        Species::Butterfly => Some(100),
        Species::Ladybug => Some(250),
        Species::Caterpillar => Some(150),
        Species::Dragonfly => Some(500),
        Species::Ant => Some(400),
    }
}

fn upgrade_base(species: Species) -> u64 {
    // Beetle upgrades stay purchasable despite the missing unlock entry.
    unlock_cost(species).unwrap_or(100) / 10
}

/// Cost to raise `species` from `current_level` to the next level, or
/// `None` at the cap (purchase disallowed).
pub fn upgrade_cost(species: Species, current_level: u32) -> Option<u64> {
    if current_level >= MAX_SPECIES_LEVEL {
        return None;
    }
    Some(upgrade_base(species) * (current_level + 1) as u64)
}

/// Registry of owned content: species (in unlock order), slot capacity,
/// and per-species upgrade levels. Every purchase is an atomic
/// spend-then-mutate against the ledger.
#[derive(Clone, Debug)]
pub struct UnlockRegistry {
    owned_species: Vec<Species>,
    pub owned_slots: usize,
    species_levels: HashMap<Species, u32>,
}

impl Default for UnlockRegistry {
    fn default() -> Self {
        Self {
            owned_species: vec![Species::Beetle],
            owned_slots: 1,
            species_levels: HashMap::from([(Species::Beetle, 1)]),
        }
    }
}

impl UnlockRegistry {
    /// Rebuilds a registry from persisted parts, restoring the invariants
    /// a hand-edited or partially corrupt save may have broken.
    pub fn from_parts(
        owned_species: Vec<Species>,
        owned_slots: usize,
        species_levels: HashMap<Species, u32>,
    ) -> Self {
        let mut owned = Vec::new();
        for species in owned_species {
            if !owned.contains(&species) {
                owned.push(species);
            }
        }
        if owned.is_empty() {
            owned.push(Species::Beetle);
        }
        let levels = owned
            .iter()
            .map(|&s| {
                let level = species_levels.get(&s).copied().unwrap_or(1);
                (s, level.clamp(1, MAX_SPECIES_LEVEL))
            })
            .collect();
        Self {
            owned_species: owned,
            owned_slots: owned_slots.clamp(1, SLOT_COSTS.len()),
            species_levels: levels,
        }
    }

    pub fn owns(&self, species: Species) -> bool {
        self.owned_species.contains(&species)
    }

    /// Owned species in unlock order.
    pub fn owned_species(&self) -> &[Species] {
        &self.owned_species
    }

    pub fn species_level(&self, species: Species) -> u32 {
        self.species_levels.get(&species).copied().unwrap_or(0)
    }

    pub fn species_levels(&self) -> &HashMap<Species, u32> {
        &self.species_levels
    }

    pub fn can_unlock_species(&self, species: Species) -> bool {
        !self.owns(species) && unlock_cost(species).is_some()
    }

    /// Unlocks `species` if it is available and affordable. A failed spend
    /// leaves both the registry and the ledger untouched.
    pub fn unlock_species(&mut self, species: Species, ledger: &mut CurrencyLedger) -> bool {
        if !self.can_unlock_species(species) {
            return false;
        }
        let cost = match unlock_cost(species) {
            Some(cost) => cost,
            None => return false,
        };
        if !ledger.spend(cost) {
            return false;
        }
        self.owned_species.push(species);
        self.species_levels.insert(species, 1);
        tracing::info!(species = species.name(), cost, "species unlocked");
        true
    }

    pub fn can_unlock_slot(&self) -> bool {
        self.owned_slots < SLOT_COSTS.len() - 1
    }

    pub fn next_slot_cost(&self) -> Option<u64> {
        if self.can_unlock_slot() {
            Some(SLOT_COSTS[self.owned_slots + 1])
        } else {
            None
        }
    }

    pub fn unlock_slot(&mut self, ledger: &mut CurrencyLedger) -> bool {
        let cost = match self.next_slot_cost() {
            Some(cost) => cost,
            None => return false,
        };
        if !ledger.spend(cost) {
            return false;
        }
        self.owned_slots += 1;
        tracing::info!(slots = self.owned_slots, cost, "slot unlocked");
        true
    }

    pub fn can_upgrade(&self, species: Species) -> bool {
        self.owns(species) && upgrade_cost(species, self.species_level(species)).is_some()
    }

    /// Raises `species` by exactly one upgrade level per call.
    pub fn upgrade_species(&mut self, species: Species, ledger: &mut CurrencyLedger) -> bool {
        if !self.owns(species) {
            return false;
        }
        let level = self.species_level(species);
        let cost = match upgrade_cost(species, level) {
            Some(cost) => cost,
            None => return false,
        };
        if !ledger.spend(cost) {
            return false;
        }
        self.species_levels.insert(species, level + 1);
        tracing::info!(
            species = species.name(),
            level = level + 1,
            cost,
            "species upgraded"
        );
        true
    }
}
