pub mod ledger;
pub mod unlocks;

pub use ledger::CurrencyLedger;
pub use unlocks::UnlockRegistry;
