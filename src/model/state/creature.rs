use crate::model::config::YardConfig;
use crate::model::species::{MovementPattern, Species};
use rand::Rng;

/// Distance at which a seeking creature counts as arrived.
pub const ARRIVAL_THRESHOLD: f64 = 5.0;
/// How long a rest lasts before wandering resumes.
pub const REST_DURATION_MS: f64 = 1000.0;
/// Walk-cycle frame toggle cadence.
pub const ANIMATION_INTERVAL_MS: f64 = 500.0;
/// Duration of a quick-pattern speed burst.
pub const BOOST_WINDOW_MS: i64 = 500;
/// Passive experience gained per elapsed millisecond.
pub const XP_PER_MS: f64 = 0.001;
/// Experience granted by one piece of food.
pub const FEED_XP: f64 = 50.0;
/// A creature levels up at `level * LEVEL_THRESHOLD` experience.
pub const LEVEL_THRESHOLD: f64 = 100.0;

pub const BASE_SIZE: f64 = 32.0;
pub const SIZE_GROWTH: f64 = 2.0;
pub const SIZE_CAP: f64 = 48.0;

/// Per-tick chance of an idle pause while wandering.
const REST_CHANCE: f64 = 0.001;
/// Per-tick chance a quick-pattern species arms a speed burst.
const BOOST_CHANCE: f64 = 0.002;
/// Vertical flutter drift: `sin(wall_clock_ms * FLUTTER_RATE) * FLUTTER_AMPLITUDE`.
const FLUTTER_RATE: f64 = 0.003;
const FLUTTER_AMPLITUDE: f64 = 0.5;

/// One insect: position, movement state, animation, and leveling.
///
/// Movement is a three-state machine (seeking a target, wandering along x,
/// resting). Animation and experience accrual run every update regardless
/// of movement state.
#[derive(Clone, Debug)]
pub struct Creature {
    pub species: Species,
    pub x: f64,
    pub y: f64,
    pub target: Option<(f64, f64)>,
    /// +1.0 facing right, -1.0 facing left.
    pub facing: f64,
    pub resting: bool,
    pub rest_elapsed: f64,
    pub animation_elapsed: f64,
    pub animation_frame: u8,
    pub level: u32,
    pub experience: f64,
    /// Sprite size derived from level; recomputed on level-up and restore.
    pub visual_size: f64,
    /// Wall-clock expiry of the current quick-pattern burst. Writes always
    /// overwrite (last write wins), so a burst ending can stomp a newer one.
    pub boost_expires_at: Option<i64>,
}

impl Creature {
    pub fn new(species: Species, x: f64, y: f64, rng: &mut impl Rng) -> Self {
        Self::with_progress(species, x, y, 1, 0.0, rng)
    }

    /// Used by restore: rebuilds a creature from persisted progress.
    pub fn with_progress(
        species: Species,
        x: f64,
        y: f64,
        level: u32,
        experience: f64,
        rng: &mut impl Rng,
    ) -> Self {
        let level = level.max(1);
        Self {
            species,
            x,
            y,
            target: None,
            facing: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
            resting: false,
            rest_elapsed: 0.0,
            animation_elapsed: 0.0,
            animation_frame: 0,
            level,
            experience: experience.max(0.0),
            visual_size: size_for_level(level),
            boost_expires_at: None,
        }
    }

    /// Directs the creature toward a point, pre-empting any rest.
    pub fn set_target(&mut self, x: f64, y: f64) {
        self.target = Some((x, y));
        self.resting = false;
        self.rest_elapsed = 0.0;
    }

    /// Grants the feed bonus. The level-up check runs once per update, so
    /// the bonus is evaluated on the next tick.
    pub fn feed(&mut self) {
        self.experience += FEED_XP;
        tracing::debug!(species = self.species.name(), xp = self.experience, "fed");
    }

    pub fn is_at_rest(&self) -> bool {
        self.resting
    }

    /// Effective speed at `now_ms`, including an active quick burst.
    pub fn current_speed(&self, now_ms: i64) -> f64 {
        let base = self.species.info().speed;
        match self.boost_expires_at {
            Some(expiry) if now_ms < expiry => base * 2.0,
            _ => base,
        }
    }

    /// Advances the creature by `dt_ms` simulated milliseconds. `now_ms`
    /// is wall-clock time, used for flutter phase and burst expiry.
    pub fn update(&mut self, dt_ms: f64, now_ms: i64, yard: &YardConfig, rng: &mut impl Rng) {
        // Expired bursts are cleared here rather than by an out-of-band timer.
        if matches!(self.boost_expires_at, Some(expiry) if now_ms >= expiry) {
            self.boost_expires_at = None;
        }

        self.advance_animation(dt_ms);

        if self.resting {
            self.rest_elapsed += dt_ms;
            if self.rest_elapsed >= REST_DURATION_MS {
                self.resting = false;
                self.rest_elapsed = 0.0;
            }
        } else {
            self.advance_movement(dt_ms, now_ms, yard, rng);
        }

        // Flutter drift is independent of resting; it only pauses while
        // steering toward a target.
        let info = self.species.info();
        if info.pattern == MovementPattern::Flutter && self.target.is_none() {
            self.y += (now_ms as f64 * FLUTTER_RATE).sin() * FLUTTER_AMPLITUDE;
            self.y = self.y.clamp(yard.band_top, yard.band_bottom);
        }

        self.experience += dt_ms * XP_PER_MS;
        // At most one level per tick: a feed bonus plus passive accrual
        // never skips a level boundary inside a single update.
        if self.experience >= self.level as f64 * LEVEL_THRESHOLD {
            self.level_up();
        }
    }

    fn advance_movement(&mut self, dt_ms: f64, now_ms: i64, yard: &YardConfig, rng: &mut impl Rng) {
        let speed = self.current_speed(now_ms);

        if let Some((tx, ty)) = self.target {
            let dx = tx - self.x;
            let dy = ty - self.y;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance > ARRIVAL_THRESHOLD {
                self.x += dx / distance * speed * dt_ms;
                self.y += dy / distance * speed * dt_ms;
                self.facing = if dx > 0.0 { 1.0 } else { -1.0 };
            } else {
                self.target = None;
                self.resting = true;
            }
        } else {
            self.x += self.facing * speed * dt_ms;
            if self.x < 0.0 || self.x > yard.width {
                self.facing = -self.facing;
                self.resting = true;
            }
            if rng.gen::<f64>() < REST_CHANCE {
                self.resting = true;
            }
        }

        if self.species.info().pattern == MovementPattern::Quick
            && rng.gen::<f64>() < BOOST_CHANCE
        {
            self.boost_expires_at = Some(now_ms + BOOST_WINDOW_MS);
        }
    }

    fn advance_animation(&mut self, dt_ms: f64) {
        self.animation_elapsed += dt_ms;
        if self.animation_elapsed > ANIMATION_INTERVAL_MS {
            self.animation_frame = (self.animation_frame + 1) % 2;
            self.animation_elapsed = 0.0;
        }
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.experience = 0.0;
        self.visual_size = size_for_level(self.level);
        tracing::info!(
            species = self.species.name(),
            level = self.level,
            "level up"
        );
    }
}

pub fn size_for_level(level: u32) -> f64 {
    (BASE_SIZE + level as f64 * SIZE_GROWTH).min(SIZE_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::AppConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn yard() -> YardConfig {
        AppConfig::default().yard
    }

    #[test]
    fn test_level_boundary_crossed_by_exactly_one_unit() {
        let mut c = Creature::new(Species::Beetle, 100.0, 70.0, &mut rng());
        c.resting = true; // keep it stationary, XP accrues regardless
        c.experience = 99.0;
        // 1000 ms contributes exactly 1.0 XP.
        c.update(1000.0, 0, &yard(), &mut rng());
        assert_eq!(c.level, 2);
        assert_eq!(c.experience, 0.0);
        assert_eq!(c.visual_size, 36.0);
    }

    #[test]
    fn test_one_level_per_tick_even_when_far_over_threshold() {
        let mut c = Creature::new(Species::Beetle, 100.0, 70.0, &mut rng());
        c.experience = 350.0;
        c.update(16.0, 0, &yard(), &mut rng());
        assert_eq!(c.level, 2);
        assert_eq!(c.experience, 0.0);
    }

    #[test]
    fn test_arrival_enters_rest_and_clears_target() {
        let mut c = Creature::new(Species::Beetle, 100.0, 70.0, &mut rng());
        c.set_target(102.0, 70.0); // within arrival threshold
        c.update(16.0, 0, &yard(), &mut rng());
        assert!(c.target.is_none());
        assert!(c.is_at_rest());
    }

    #[test]
    fn test_set_target_preempts_rest() {
        let mut c = Creature::new(Species::Beetle, 100.0, 70.0, &mut rng());
        c.resting = true;
        c.rest_elapsed = 400.0;
        c.set_target(300.0, 60.0);
        assert!(!c.is_at_rest());
        assert_eq!(c.rest_elapsed, 0.0);
        let before = c.x;
        c.update(16.0, 0, &yard(), &mut rng());
        assert!(c.x > before);
    }

    #[test]
    fn test_rest_expires_after_fixed_duration() {
        let mut c = Creature::new(Species::Beetle, 100.0, 70.0, &mut rng());
        c.resting = true;
        c.update(999.0, 0, &yard(), &mut rng());
        assert!(c.is_at_rest());
        c.update(2.0, 0, &yard(), &mut rng());
        assert!(!c.is_at_rest());
        assert_eq!(c.rest_elapsed, 0.0);
    }

    #[test]
    fn test_wall_bounce_flips_facing_and_rests() {
        let mut c = Creature::new(Species::Beetle, 0.5, 70.0, &mut rng());
        c.facing = -1.0;
        c.update(100.0, 0, &yard(), &mut rng());
        assert_eq!(c.facing, 1.0);
        assert!(c.is_at_rest());
    }

    #[test]
    fn test_boost_doubles_speed_until_expiry() {
        let mut c = Creature::new(Species::Ladybug, 100.0, 70.0, &mut rng());
        c.boost_expires_at = Some(500);
        assert_eq!(c.current_speed(0), 0.060);
        assert_eq!(c.current_speed(500), 0.030);
        // update clears an expired burst
        c.update(16.0, 600, &yard(), &mut rng());
        assert!(c.boost_expires_at.is_none() || c.boost_expires_at.unwrap() > 600);
    }

    #[test]
    fn test_boost_overwrite_is_last_write_wins() {
        let mut c = Creature::new(Species::Ladybug, 100.0, 70.0, &mut rng());
        c.boost_expires_at = Some(900);
        c.boost_expires_at = Some(400);
        assert_eq!(c.current_speed(500), 0.030);
    }

    #[test]
    fn test_flutter_stays_inside_band() {
        let yard = yard();
        let mut c = Creature::new(Species::Butterfly, 100.0, yard.band_top, &mut rng());
        for step in 0..200 {
            c.update(16.0, step * 16, &yard, &mut rng());
            assert!(c.y >= yard.band_top && c.y <= yard.band_bottom);
        }
    }

    #[test]
    fn test_animation_toggles_while_resting() {
        let mut c = Creature::new(Species::Beetle, 100.0, 70.0, &mut rng());
        c.resting = true;
        c.rest_elapsed = 0.0;
        c.update(501.0, 0, &yard(), &mut rng());
        assert_eq!(c.animation_frame, 1);
    }
}
