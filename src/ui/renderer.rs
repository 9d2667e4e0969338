use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::{Block, Borders, Widget};

use crate::model::economy::unlocks;
use crate::model::simulation::Simulation;
use crate::model::species::Species;

/// Vertical extent of the world strip in px. Creatures only occupy the
/// band configured in [`crate::model::config::YardConfig`].
pub const WORLD_DEPTH: f64 = 100.0;

/// Read-only view over the yard: food pellets, insects, and a title line
/// with the wallet. The simulation never sees pixels; this widget only
/// reads positions, sizes, and state.
pub struct YardWidget<'a> {
    sim: &'a Simulation,
}

impl<'a> YardWidget<'a> {
    pub fn new(sim: &'a Simulation) -> Self {
        Self { sim }
    }

    fn inner(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(area)
    }

    pub fn world_to_screen(sim: &Simulation, wx: f64, wy: f64, area: Rect) -> Option<(u16, u16)> {
        let inner = Self::inner(area);
        if inner.width == 0 || inner.height == 0 {
            return None;
        }
        let x = inner.x as f64 + wx / sim.yard.width * inner.width as f64;
        let y = inner.y as f64 + wy / WORLD_DEPTH * inner.height as f64;
        let (x, y) = (x as u16, y as u16);
        if x >= inner.left() && x < inner.right() && y >= inner.top() && y < inner.bottom() {
            Some((x, y))
        } else {
            None
        }
    }

    pub fn screen_to_world(
        sim: &Simulation,
        screen_x: u16,
        screen_y: u16,
        area: Rect,
    ) -> Option<(f64, f64)> {
        let inner = Self::inner(area);
        if inner.width == 0
            || inner.height == 0
            || screen_x < inner.left()
            || screen_x >= inner.right()
            || screen_y < inner.top()
            || screen_y >= inner.bottom()
        {
            return None;
        }
        let wx = (screen_x - inner.x) as f64 / inner.width as f64 * sim.yard.width;
        let wy = (screen_y - inner.y) as f64 / inner.height as f64 * WORLD_DEPTH;
        Some((wx, wy))
    }
}

/// Decorative props scattered through the band: (fraction of width, y,
/// glyph, color). Render-only; the simulation never sees them.
const PROPS: [(f64, f64, char, Color); 7] = [
    (0.10, 85.0, '"', Color::Rgb(60, 160, 60)),
    (0.25, 40.0, '\'', Color::Rgb(80, 180, 80)),
    (0.37, 78.0, '%', Color::Rgb(230, 120, 200)),
    (0.52, 88.0, '"', Color::Rgb(60, 160, 60)),
    (0.68, 45.0, '%', Color::Rgb(240, 200, 80)),
    (0.81, 82.0, '\'', Color::Rgb(80, 180, 80)),
    (0.93, 70.0, '"', Color::Rgb(60, 160, 60)),
];

impl Widget for YardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ledger = &self.sim.ledger;
        let block = Block::default()
            .title(format!(
                " Bug Yard | coins {} | gems {} | slots {}/{} | tick {} ",
                ledger.coins,
                ledger.gems,
                self.sim.creatures.len(),
                self.sim.unlocks.owned_slots,
                self.sim.ticks,
            ))
            .borders(Borders::ALL);
        block.render(area, buf);

        for (fraction, y, glyph, color) in PROPS {
            let wx = fraction * self.sim.yard.width;
            if let Some((x, y)) = Self::world_to_screen(self.sim, wx, y, area) {
                let cell = &mut buf[(x, y)];
                cell.set_char(glyph);
                cell.set_fg(color);
            }
        }

        for food in &self.sim.food {
            if food.consumed {
                continue;
            }
            if let Some((x, y)) = Self::world_to_screen(self.sim, food.x, food.y, area) {
                let cell = &mut buf[(x, y)];
                cell.set_char('*');
                // fade with remaining life
                let v = (105.0 + 150.0 * food.life_fraction()) as u8;
                cell.set_fg(Color::Rgb(v, v, 0));
            }
        }

        for creature in &self.sim.creatures {
            if let Some((x, y)) = Self::world_to_screen(self.sim, creature.x, creature.y, area) {
                let info = creature.species.info();
                let cell = &mut buf[(x, y)];
                cell.set_char(info.symbols[creature.animation_frame as usize % 2]);
                cell.set_fg(if creature.is_at_rest() {
                    info.secondary
                } else {
                    info.primary
                });
                // level tag to the right of the glyph
                if creature.level > 1 && x + 1 < area.right() - 1 {
                    let tag = &mut buf[(x + 1, y)];
                    tag.set_char(level_glyph(creature.level));
                    tag.set_fg(Color::Gray);
                }
            }
        }
    }
}

fn level_glyph(level: u32) -> char {
    char::from_digit(level.min(9), 10).unwrap_or('9')
}

/// Bottom shop bar: per-species unlock/upgrade state and key costs.
pub struct ShopWidget<'a> {
    sim: &'a Simulation,
    upgrade_target: Species,
}

impl<'a> ShopWidget<'a> {
    pub fn new(sim: &'a Simulation, upgrade_target: Species) -> Self {
        Self {
            sim,
            upgrade_target,
        }
    }
}

impl Widget for ShopWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let registry = &self.sim.unlocks;
        let mut line = String::new();
        for (idx, species) in Species::ALL.iter().enumerate() {
            if idx > 0 {
                line.push_str("  ");
            }
            if registry.owns(*species) {
                let marker = if *species == self.upgrade_target {
                    '>'
                } else {
                    ' '
                };
                line.push_str(&format!(
                    "{marker}{} L{}",
                    species.name(),
                    registry.species_level(*species)
                ));
            } else if let Some(cost) = unlocks::unlock_cost(*species) {
                line.push_str(&format!("[{}] {} {}c", idx + 1, species.name(), cost));
            }
        }
        let slot = match registry.next_slot_cost() {
            Some(cost) => format!("[s]lot {cost}c"),
            None => "slots maxed".to_string(),
        };
        let upgrade = match unlocks::upgrade_cost(
            self.upgrade_target,
            registry.species_level(self.upgrade_target),
        ) {
            Some(cost) => format!("[U]pgrade {} {}c", self.upgrade_target.name(), cost),
            None => format!("{} maxed", self.upgrade_target.name()),
        };

        let block = Block::default()
            .title(format!(" Shop | {slot} | {upgrade} | [u] cycle [g] grant [q] quit "))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height > 0 {
            buf.set_string(inner.x, inner.y, line, ratatui::style::Style::default());
        }
    }
}
