use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::style::Color;

use crate::app::state::App;
use crate::model::species::Species;
use crate::ui::renderer::YardWidget;

/// Coins handed out by the debug faucet key.
const DEBUG_GRANT: u64 = 100;

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('s') => {
                let cost = self.sim.unlocks.next_slot_cost();
                if self.sim.unlock_slot(&mut self.rng) {
                    self.push_event(
                        format!("Slot unlocked ({} total)", self.sim.unlocks.owned_slots),
                        Color::Green,
                    );
                } else {
                    self.reject("slot", cost);
                }
            }
            KeyCode::Char('u') => {
                self.cycle_upgrade_target();
            }
            KeyCode::Char('U') => {
                let target = self.upgrade_target;
                if self.sim.upgrade_species(target) {
                    let level = self.sim.unlocks.species_level(target);
                    self.push_event(
                        format!("{} upgraded to L{level}", target.name()),
                        Color::Green,
                    );
                } else {
                    self.push_event(
                        format!("Cannot upgrade {}", target.name()),
                        Color::Red,
                    );
                }
            }
            KeyCode::Char('g') => {
                self.sim.ledger.grant(DEBUG_GRANT);
                self.push_event(format!("+{DEBUG_GRANT} coins (debug)"), Color::Yellow);
            }
            KeyCode::Char(c @ '2'..='6') => {
                let idx = c as usize - '1' as usize;
                let species = Species::ALL[idx];
                self.try_unlock_species(species);
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some((wx, wy)) = YardWidget::screen_to_world(
            &self.sim,
            mouse.column,
            mouse.row,
            self.last_yard_rect,
        ) {
            self.sim.drop_food(wx, wy);
        }
    }

    fn try_unlock_species(&mut self, species: Species) {
        let cost = crate::model::economy::unlocks::unlock_cost(species);
        if self.sim.unlock_species(species, &mut self.rng) {
            self.push_event(format!("{} unlocked!", species.name()), Color::Green);
        } else if self.sim.unlocks.owns(species) {
            self.push_event(format!("{} already owned", species.name()), Color::DarkGray);
        } else {
            self.reject(species.name(), cost);
        }
    }

    fn cycle_upgrade_target(&mut self) {
        let owned = self.sim.unlocks.owned_species();
        if owned.is_empty() {
            return;
        }
        let next = owned
            .iter()
            .position(|&s| s == self.upgrade_target)
            .map(|i| (i + 1) % owned.len())
            .unwrap_or(0);
        self.upgrade_target = owned[next];
    }

    fn reject(&mut self, what: &str, cost: Option<u64>) {
        let message = match cost {
            Some(cost) => format!("Need {cost} coins for {what} (have {})", self.sim.ledger.coins),
            None => format!("{what} is not available"),
        };
        self.push_event(message, Color::Red);
    }
}
