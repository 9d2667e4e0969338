use crate::model::state::Creature;

/// Wallet plus passive-income engine.
///
/// Accrual is quantized: income is minted at most once per elapsed
/// wall-clock second. Sub-second calls are no-ops that leave the accrual
/// timestamp untouched, so the fractional second is not lost.
#[derive(Clone, Debug)]
pub struct CurrencyLedger {
    pub coins: u64,
    pub gems: u64,
    /// Monotonic lifetime income, never reduced by spending.
    pub total_earned: u64,
    pub earn_rate: f64,
    /// Wall-clock ms of the last successful accrual.
    pub last_accrual_ms: i64,
}

impl CurrencyLedger {
    pub fn new(now_ms: i64) -> Self {
        Self {
            coins: 0,
            gems: 0,
            total_earned: 0,
            earn_rate: 1.0,
            last_accrual_ms: now_ms,
        }
    }

    /// Mints passive income from the owned creatures if at least one full
    /// second of wall-clock time has elapsed. Returns the coins minted.
    pub fn accrue(&mut self, creatures: &[Creature], now_ms: i64) -> u64 {
        let elapsed_ms = now_ms - self.last_accrual_ms;
        if elapsed_ms < 1000 {
            return 0;
        }

        let income_per_sec: f64 = self.earn_rate
            * creatures
                .iter()
                .map(|c| c.level as f64 * c.species.info().income_multiplier)
                .sum::<f64>();
        let minted = (income_per_sec * elapsed_ms as f64 / 1000.0).floor() as u64;

        self.coins += minted;
        self.total_earned += minted;
        self.last_accrual_ms = now_ms;
        if minted > 0 {
            tracing::debug!(minted, coins = self.coins, "accrued income");
        }
        minted
    }

    pub fn can_afford(&self, cost: u64) -> bool {
        self.coins >= cost
    }

    /// Atomic check-then-deduct. Returns false and leaves the balance
    /// untouched when funds are insufficient.
    pub fn spend(&mut self, amount: u64) -> bool {
        if self.coins < amount {
            return false;
        }
        self.coins -= amount;
        true
    }

    /// Debug faucet used by the input layer.
    pub fn grant(&mut self, amount: u64) {
        self.coins += amount;
        self.total_earned += amount;
    }
}
