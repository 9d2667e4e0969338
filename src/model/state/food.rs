/// How long a dropped pellet stays edible, in milliseconds.
pub const FOOD_TTL_MS: f64 = 10_000.0;

/// A dropped food pellet. Once consumed it is ignored by collision checks
/// and swept out of the active set at the next tick boundary.
#[derive(Clone, Debug)]
pub struct Food {
    pub x: f64,
    pub y: f64,
    pub remaining_life: f64,
    pub consumed: bool,
}

impl Food {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            remaining_life: FOOD_TTL_MS,
            consumed: false,
        }
    }

    pub fn update(&mut self, dt_ms: f64) {
        self.remaining_life -= dt_ms;
        if self.remaining_life <= 0.0 {
            self.consumed = true;
        }
    }

    pub fn consume(&mut self) {
        self.consumed = true;
    }

    /// Fraction of life left, for render fade. Clamped to [0, 1].
    pub fn life_fraction(&self) -> f64 {
        (self.remaining_life / FOOD_TTL_MS).clamp(0.0, 1.0)
    }
}
