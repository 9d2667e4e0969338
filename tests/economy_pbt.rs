use bugyard_lib::model::economy::ledger::CurrencyLedger;
use bugyard_lib::model::economy::unlocks::{
    self, UnlockRegistry, MAX_SPECIES_LEVEL, SLOT_COSTS,
};
use bugyard_lib::model::species::Species;
use proptest::prelude::*;
use std::collections::HashMap;

fn arb_species() -> impl Strategy<Value = Species> {
    prop::sample::select(Species::ALL.to_vec())
}

#[derive(Debug, Clone)]
enum WalletOp {
    Grant(u64),
    Spend(u64),
}

fn arb_wallet_op() -> impl Strategy<Value = WalletOp> {
    prop_oneof![
        (0u64..10_000).prop_map(WalletOp::Grant),
        (0u64..10_000).prop_map(WalletOp::Spend),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// No sequence of grants and spends can overdraw the wallet, and
    /// lifetime earnings never shrink.
    #[test]
    fn wallet_never_overdraws(ops in prop::collection::vec(arb_wallet_op(), 0..50)) {
        let mut ledger = CurrencyLedger::new(0);
        let mut prev_total = 0;
        for op in ops {
            match op {
                WalletOp::Grant(amount) => ledger.grant(amount),
                WalletOp::Spend(amount) => {
                    let before = ledger.coins;
                    let ok = ledger.spend(amount);
                    if ok {
                        prop_assert_eq!(ledger.coins, before - amount);
                    } else {
                        prop_assert_eq!(ledger.coins, before);
                        prop_assert!(amount > before);
                    }
                }
            }
            prop_assert!(ledger.total_earned >= prev_total);
            prop_assert!(ledger.total_earned >= ledger.coins);
            prev_total = ledger.total_earned;
        }
    }

    /// Accrual timestamps only move forward, and sub-second calls never
    /// mint or advance the clock.
    #[test]
    fn accrual_clock_is_monotone(deltas in prop::collection::vec(0i64..5_000, 1..30)) {
        let mut ledger = CurrencyLedger::new(0);
        let mut now = 0i64;
        for delta in deltas {
            let stamp_before = ledger.last_accrual_ms;
            now += delta;
            let minted = ledger.accrue(&[], now);
            prop_assert_eq!(minted, 0); // no creatures, no income
            if now - stamp_before < 1000 {
                prop_assert_eq!(ledger.last_accrual_ms, stamp_before);
            } else {
                prop_assert_eq!(ledger.last_accrual_ms, now);
            }
        }
    }

    /// Upgrade cost strictly increases with level and vanishes at the cap.
    #[test]
    fn upgrade_cost_is_monotone_then_capped(species in arb_species(), level in 1u32..MAX_SPECIES_LEVEL) {
        let here = unlocks::upgrade_cost(species, level);
        let next = unlocks::upgrade_cost(species, level + 1);
        prop_assert!(here.is_some());
        if level + 1 < MAX_SPECIES_LEVEL {
            prop_assert!(next.unwrap() > here.unwrap());
        }
        prop_assert_eq!(unlocks::upgrade_cost(species, MAX_SPECIES_LEVEL), None);
    }

    /// `from_parts` repairs any persisted shape into a valid registry:
    /// non-empty ordered species, slots within table bounds, levels
    /// clamped and only present for owned species.
    #[test]
    fn from_parts_always_restores_invariants(
        raw_species in prop::collection::vec(arb_species(), 0..12),
        slots in 0usize..100,
        raw_levels in prop::collection::hash_map(arb_species(), 0u32..50, 0..6),
    ) {
        let levels: HashMap<Species, u32> = raw_levels;
        let registry = UnlockRegistry::from_parts(raw_species, slots, levels);

        prop_assert!(!registry.owned_species().is_empty());
        prop_assert!(registry.owned_slots >= 1);
        prop_assert!(registry.owned_slots <= SLOT_COSTS.len());
        // no duplicates, first-occurrence order preserved
        let mut seen = Vec::new();
        for &s in registry.owned_species() {
            prop_assert!(!seen.contains(&s));
            seen.push(s);
        }
        for &s in registry.owned_species() {
            let level = registry.species_level(s);
            prop_assert!(level >= 1 && level <= MAX_SPECIES_LEVEL);
        }
        for s in Species::ALL {
            if !registry.owns(s) {
                prop_assert_eq!(registry.species_level(s), 0);
            }
        }
    }

    /// Purchases are atomic: a failed unlock leaves registry and wallet
    /// exactly as they were.
    #[test]
    fn failed_purchases_change_nothing(species in arb_species(), coins in 0u64..99) {
        let mut registry = UnlockRegistry::default();
        let mut ledger = CurrencyLedger::new(0);
        ledger.grant(coins);
        // every species unlock costs at least 100
        let ok = registry.unlock_species(species, &mut ledger);
        if species == Species::Beetle {
            prop_assert!(!ok); // owned from creation
        }
        if !ok {
            prop_assert_eq!(ledger.coins, coins);
            prop_assert_eq!(registry.owned_species(), &[Species::Beetle]);
        }
    }
}
