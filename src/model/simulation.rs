use crate::model::config::YardConfig;
use crate::model::economy::{CurrencyLedger, UnlockRegistry};
use crate::model::species::Species;
use crate::model::state::{Creature, Food};
use rand::Rng;

/// A creature eats any unconsumed pellet closer than this.
pub const FEED_RADIUS: f64 = 20.0;

/// The whole game state and its tick orchestrator.
///
/// Single-threaded by design: commands (food drops, purchases) mutate
/// state between ticks, and each tick runs its passes to completion in a
/// fixed order — creature updates, food aging and sweep, feeding
/// collisions, currency accrual.
pub struct Simulation {
    pub creatures: Vec<Creature>,
    pub food: Vec<Food>,
    pub ledger: CurrencyLedger,
    pub unlocks: UnlockRegistry,
    pub yard: YardConfig,
    pub ticks: u64,
}

impl Simulation {
    pub fn new(yard: YardConfig, now_ms: i64, rng: &mut impl Rng) -> Self {
        let mut sim = Self {
            creatures: Vec::new(),
            food: Vec::new(),
            ledger: CurrencyLedger::new(now_ms),
            unlocks: UnlockRegistry::default(),
            yard,
            ticks: 0,
        };
        sim.populate_missing(rng);
        sim
    }

    /// Spawns one creature per owned species, capped by slot capacity.
    /// Used at construction and after restoring a save with no roster.
    pub fn populate_missing(&mut self, rng: &mut impl Rng) {
        if !self.creatures.is_empty() {
            return;
        }
        let owned: Vec<Species> = self.unlocks.owned_species().to_vec();
        for species in owned {
            if self.creatures.len() >= self.unlocks.owned_slots {
                break;
            }
            self.spawn_creature(species, rng);
        }
    }

    /// Advances everything by `dt_ms` simulated milliseconds. `now_ms` is
    /// wall-clock time; accrual depends on it surviving restarts.
    pub fn tick(&mut self, dt_ms: f64, now_ms: i64, rng: &mut impl Rng) {
        self.ticks += 1;

        for creature in &mut self.creatures {
            creature.update(dt_ms, now_ms, &self.yard, rng);
        }

        for food in &mut self.food {
            food.update(dt_ms);
        }
        // Ordered sweep: pellets consumed last tick leave here, preserving
        // relative order of the survivors.
        self.food.retain(|f| !f.consumed);

        // Creature-major, food-minor: the first creature in roster order
        // wins a contested pellet, and one creature may eat several
        // pellets in a single tick.
        for creature in &mut self.creatures {
            for food in &mut self.food {
                if !food.consumed && distance(creature.x, creature.y, food.x, food.y) < FEED_RADIUS
                {
                    food.consume();
                    creature.feed();
                }
            }
        }

        self.ledger.accrue(&self.creatures, now_ms);
    }

    /// Drops a pellet and points every creature at it. A newer drop
    /// overwrites older targets; there is no target queue.
    pub fn drop_food(&mut self, x: f64, y: f64) {
        self.food.push(Food::new(x, y));
        for creature in &mut self.creatures {
            creature.set_target(x, y);
        }
        tracing::debug!(x, y, "food dropped");
    }

    /// Buys a species unlock; on success the new species joins the yard
    /// if a slot is free.
    pub fn unlock_species(&mut self, species: Species, rng: &mut impl Rng) -> bool {
        if !self.unlocks.unlock_species(species, &mut self.ledger) {
            return false;
        }
        if self.creatures.len() < self.unlocks.owned_slots {
            self.spawn_creature(species, rng);
        }
        true
    }

    /// Buys a slot; on success the earliest-unlocked species fills it.
    pub fn unlock_slot(&mut self, rng: &mut impl Rng) -> bool {
        if !self.unlocks.unlock_slot(&mut self.ledger) {
            return false;
        }
        if self.creatures.len() < self.unlocks.owned_slots {
            let fill = self.unlocks.owned_species().first().copied();
            if let Some(species) = fill {
                self.spawn_creature(species, rng);
            }
        }
        true
    }

    pub fn upgrade_species(&mut self, species: Species) -> bool {
        self.unlocks.upgrade_species(species, &mut self.ledger)
    }

    /// Places a new creature at the next entry of the fixed spawn cycle,
    /// indexed by the current roster size.
    fn spawn_creature(&mut self, species: Species, rng: &mut impl Rng) {
        let points = &self.yard.spawn_points;
        let (fraction, y) = points
            .get(self.creatures.len() % points.len().max(1))
            .copied()
            .unwrap_or((0.5, 70.0));
        let x = fraction * self.yard.width;
        self.creatures.push(Creature::new(species, x, y, rng));
        tracing::info!(species = species.name(), x, y, "creature spawned");
    }
}

fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
}
